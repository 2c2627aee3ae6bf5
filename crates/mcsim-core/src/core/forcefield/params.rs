use super::energy::{self, EnergyError};
use super::potentials;
use crate::core::models::configuration::SimulationBox;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Lennard-Jones parameters in reduced units. σ and ε are fixed at 1, so the
/// only free parameter is the interaction cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialParams {
    pub cutoff: f64,
}

/// Energy evaluator bound to one periodic box and one cutoff.
///
/// Every energy the engine computes goes through the same model so that the
/// per-particle sums before and after a trial move use identical distance and
/// cutoff rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyModel {
    box_length: f64,
    cutoff: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyBreakdown {
    pub pairwise: f64,
    pub tail: f64,
}

impl EnergyBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.pairwise + self.tail
    }
}

impl EnergyModel {
    pub fn new(box_length: f64, cutoff: f64) -> Self {
        Self { box_length, cutoff }
    }

    pub fn from_parts(simulation_box: &SimulationBox, params: &PotentialParams) -> Self {
        Self::new(simulation_box.edge_length, params.cutoff)
    }

    #[inline]
    pub fn box_length(&self) -> f64 {
        self.box_length
    }

    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn total_energy(&self, coordinates: &[Point3<f64>]) -> Result<f64, EnergyError> {
        energy::total_energy(coordinates, self.box_length, self.cutoff)
    }

    #[inline]
    pub fn pair_energy(
        &self,
        coordinates: &[Point3<f64>],
        index: usize,
    ) -> Result<f64, EnergyError> {
        energy::pair_energy(coordinates, index, self.box_length, self.cutoff)
    }

    #[inline]
    pub fn tail_correction(&self, num_particles: usize) -> f64 {
        potentials::tail_correction(num_particles, self.box_length, self.cutoff)
    }

    /// Pairwise sum and tail correction of a whole configuration.
    pub fn breakdown(&self, coordinates: &[Point3<f64>]) -> Result<EnergyBreakdown, EnergyError> {
        Ok(EnergyBreakdown {
            pairwise: self.total_energy(coordinates)?,
            tail: self.tail_correction(coordinates.len()),
        })
    }

    /// Total system energy including the tail correction.
    pub fn system_energy(&self, coordinates: &[Point3<f64>]) -> Result<f64, EnergyError> {
        self.breakdown(coordinates).map(|b| b.total())
    }
}
