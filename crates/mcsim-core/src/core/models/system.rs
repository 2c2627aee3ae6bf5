use super::configuration::{Configuration, SimulationBox};

/// A parsed starting point for a simulation: the periodic cell, the particle
/// positions and the labels that came with them.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    pub simulation_box: SimulationBox,
    pub configuration: Configuration,
    pub labels: Vec<String>,
}

impl ParticleSystem {
    /// Builds a system whose particles are all labelled `default_label`.
    pub fn new(
        simulation_box: SimulationBox,
        configuration: Configuration,
        default_label: &str,
    ) -> Self {
        let labels = vec![default_label.to_string(); configuration.len()];
        Self {
            simulation_box,
            configuration,
            labels,
        }
    }

    pub fn with_labels(
        simulation_box: SimulationBox,
        configuration: Configuration,
        labels: Vec<String>,
    ) -> Self {
        debug_assert_eq!(labels.len(), configuration.len());
        Self {
            simulation_box,
            configuration,
            labels,
        }
    }

    #[inline]
    pub fn num_particles(&self) -> usize {
        self.configuration.len()
    }

    #[inline]
    pub fn box_length(&self) -> f64 {
        self.simulation_box.edge_length
    }

    /// Returns the label of particle `index`, or `"X"` when none was recorded.
    pub fn label(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or("X")
    }
}
