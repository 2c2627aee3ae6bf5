//! # mcsim Core Library
//!
//! Metropolis Monte Carlo sampling of Lennard-Jones particles in the canonical
//! (constant N, V, T) ensemble, in reduced units.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that the numerical pieces can be
//! tested in isolation from the stateful sampler:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Configuration`,
//!   `SimulationBox`), periodic geometry, the Lennard-Jones potential with its
//!   tail correction, the energy evaluators, and file I/O.
//!
//! - **[`engine`]: The Logic Core.** The Monte Carlo engine itself: run
//!   parameters, the Metropolis criterion, trial-move transactions, running
//!   energy bookkeeping and the trajectory recorder.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into a
//!   single call that validates parameters, runs a chain and hands back the
//!   collected trajectory.

pub mod core;
pub mod engine;
pub mod workflows;
