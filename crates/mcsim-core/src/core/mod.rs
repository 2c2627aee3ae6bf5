//! # Core Module
//!
//! Stateless building blocks of the simulation.
//!
//! - **Particle Representation** ([`models`]) - Positions, the periodic box and the parsed system
//! - **Periodic Geometry** ([`geometry`]) - Minimum-image displacement and distance
//! - **Energy Calculations** ([`forcefield`]) - Lennard-Jones potential, tail correction and evaluators
//! - **File I/O** ([`io`]) - Coordinate files, energy histories and trajectory frames
//!
//! Everything here is expressed in reduced units, where the Lennard-Jones length
//! scale σ and energy scale ε are both 1.

pub mod forcefield;
pub mod geometry;
pub mod io;
pub mod models;
