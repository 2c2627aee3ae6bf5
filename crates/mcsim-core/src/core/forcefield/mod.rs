//! # Force Field Module
//!
//! Energy model of the simulation: the reduced-unit Lennard-Jones pair
//! potential, its analytic long-range tail correction, and the evaluators that
//! sum it over a periodic configuration.
//!
//! ## Key Components
//!
//! - [`potentials`] - Closed-form pair potential and tail correction
//! - [`energy`] - Whole-system and single-particle energy sums
//! - [`params`] - Cutoff parameters and the [`params::EnergyModel`] used by the engine
//!
//! ## Usage
//!
//! ```ignore
//! use mcsim::core::forcefield::params::EnergyModel;
//!
//! let model = EnergyModel::new(box_length, cutoff);
//! let energy = model.system_energy(configuration.positions())?;
//! let environment = model.pair_energy(configuration.positions(), 3)?;
//! ```

pub mod energy;
pub mod params;
pub mod potentials;
