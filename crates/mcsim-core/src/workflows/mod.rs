//! High-level entry points that run a complete simulation from parsed input.

pub mod simulate;
