//! # I/O Module
//!
//! Readers and writers for the files that surround a simulation run.
//!
//! - [`coords`] - The boxed coordinate format used for starting configurations
//!   (box length, particle count, then `label x y z` lines).
//! - [`trajectory`] - Energy histories as CSV and sampled frames as multi-frame XYZ.
//! - [`traits`] - The [`traits::ParticleFile`] interface implemented by coordinate formats.

pub mod coords;
pub mod trajectory;
pub mod traits;
