use nalgebra::{Point3, Vector3};

/// Ordered particle positions. The index of a position is the particle's
/// identity for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    positions: Vec<Point3<f64>>,
}

impl Configuration {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self { positions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    #[inline]
    pub fn position(&self, index: usize) -> Option<&Point3<f64>> {
        self.positions.get(index)
    }

    /// Moves a particle by `displacement`, returning the position it had before.
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn displace(&mut self, index: usize, displacement: &Vector3<f64>) -> Point3<f64> {
        let previous = self.positions[index];
        self.positions[index] = previous + displacement;
        previous
    }

    /// Overwrites a particle position. Panics if `index` is out of bounds.
    #[inline]
    pub fn set_position(&mut self, index: usize, position: Point3<f64>) {
        self.positions[index] = position;
    }

    /// Value copy of the current positions, detached from later mutation.
    pub fn snapshot(&self) -> Vec<Point3<f64>> {
        self.positions.clone()
    }

    pub fn into_positions(self) -> Vec<Point3<f64>> {
        self.positions
    }
}

impl From<Vec<Point3<f64>>> for Configuration {
    fn from(positions: Vec<Point3<f64>>) -> Self {
        Self::new(positions)
    }
}

/// Cubic periodic cell with the same edge length on all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    pub edge_length: f64,
}

impl SimulationBox {
    pub fn new(edge_length: f64) -> Self {
        Self { edge_length }
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        self.edge_length.powi(3)
    }

    /// Largest cutoff for which the minimum-image convention is unambiguous.
    #[inline]
    pub fn half_length(&self) -> f64 {
        0.5 * self.edge_length
    }

    /// Number density of `num_particles` particles in this box.
    #[inline]
    pub fn density(&self, num_particles: usize) -> f64 {
        num_particles as f64 / self.volume()
    }
}
