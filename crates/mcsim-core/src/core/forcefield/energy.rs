use super::potentials;
use crate::core::geometry;
use nalgebra::Point3;
use thiserror::Error;
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnergyError {
    #[error(
        "Degenerate geometry: particles {first} and {second} are {distance:e} apart and their pair energy diverges"
    )]
    DegenerateGeometry {
        first: usize,
        second: usize,
        distance: f64,
    },
    #[error("Particle index {index} is out of range for a configuration of {len} particles")]
    ParticleOutOfRange { index: usize, len: usize },
}

/// Lennard-Jones energy of the pair `(i, j)` under the minimum-image
/// convention, or zero when the pair is separated by at least `cutoff`.
#[inline]
fn pair_term(
    coordinates: &[Point3<f64>],
    i: usize,
    j: usize,
    box_length: f64,
    cutoff: f64,
) -> Result<f64, EnergyError> {
    let dist = geometry::distance(&coordinates[i], &coordinates[j], Some(box_length));
    if dist >= cutoff {
        return Ok(0.0);
    }
    let energy = potentials::lennard_jones(dist);
    if dist <= 0.0 || !energy.is_finite() {
        return Err(EnergyError::DegenerateGeometry {
            first: i.min(j),
            second: i.max(j),
            distance: dist,
        });
    }
    Ok(energy)
}

/// Sum of the pair potential over every unordered pair closer than `cutoff`.
///
/// This is an O(N²) scan. The engine only calls it to seed the running energy
/// and to audit it; the tail correction is not included.
#[instrument(level = "debug", skip_all, fields(num_particles = coordinates.len()))]
pub fn total_energy(
    coordinates: &[Point3<f64>],
    box_length: f64,
    cutoff: f64,
) -> Result<f64, EnergyError> {
    let n = coordinates.len();
    let row = |i: usize| -> Result<f64, EnergyError> {
        ((i + 1)..n)
            .map(|j| pair_term(coordinates, i, j, box_length, cutoff))
            .sum()
    };

    #[cfg(not(feature = "parallel"))]
    let total: Result<f64, EnergyError> = (0..n).map(row).sum();

    #[cfg(feature = "parallel")]
    let total: Result<f64, EnergyError> = (0..n).into_par_iter().map(row).sum();

    total
}

/// Interaction energy of particle `index` with every other particle closer
/// than `cutoff`. Self-interaction is excluded.
pub fn pair_energy(
    coordinates: &[Point3<f64>],
    index: usize,
    box_length: f64,
    cutoff: f64,
) -> Result<f64, EnergyError> {
    let n = coordinates.len();
    if index >= n {
        return Err(EnergyError::ParticleOutOfRange { index, len: n });
    }

    let mut energy = 0.0;
    for j in 0..n {
        if j == index {
            continue;
        }
        energy += pair_term(coordinates, index, j, box_length, cutoff)?;
    }
    Ok(energy)
}
