use super::config::ConfigError;
use crate::core::forcefield::energy::EnergyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid simulation parameters: {0}")]
    Config(#[from] ConfigError),

    #[error("Energy evaluation failed: {source}")]
    Energy {
        #[from]
        source: EnergyError,
    },

    #[error("Simulation already completed all {steps} steps")]
    Completed { steps: usize },
}
