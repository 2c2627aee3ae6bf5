use nalgebra::Point3;

/// One sampled point of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub step: usize,
    pub energy_per_particle: f64,
    pub positions: Vec<Point3<f64>>,
}

impl Frame {
    pub fn new(step: usize, energy_per_particle: f64, positions: Vec<Point3<f64>>) -> Self {
        Self {
            step,
            energy_per_particle,
            positions,
        }
    }

    #[inline]
    pub fn num_particles(&self) -> usize {
        self.positions.len()
    }

    /// Total energy of the sampled configuration.
    #[inline]
    pub fn total_energy(&self) -> f64 {
        self.energy_per_particle * self.positions.len() as f64
    }
}
