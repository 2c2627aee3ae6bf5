//! Particle data structures shared by the evaluators, the engine and the I/O layer.

pub mod configuration;
pub mod frame;
pub mod system;
