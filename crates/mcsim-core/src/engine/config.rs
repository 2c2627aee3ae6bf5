use crate::core::forcefield::params::PotentialParams;
use crate::core::models::configuration::SimulationBox;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter,
        reason: reason.into(),
    }
}

fn require_positive(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            parameter,
            format!("must be a positive finite number, got {}", value),
        ));
    }
    Ok(())
}

fn require_at_least_one(parameter: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(parameter, "must be at least 1"));
    }
    Ok(())
}

/// Parameters of one canonical-ensemble Monte Carlo chain, in reduced units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub reduced_temperature: f64,
    pub num_steps: usize,
    pub max_displacement: f64,
    pub cutoff: f64,
    pub sampling_frequency: usize,
    pub random_seed: Option<u64>,
    pub audit_frequency: Option<usize>,
}

impl SimulationConfig {
    /// Inverse reduced temperature used by the acceptance rule.
    #[inline]
    pub fn beta(&self) -> f64 {
        1.0 / self.reduced_temperature
    }

    pub fn potential(&self) -> PotentialParams {
        PotentialParams {
            cutoff: self.cutoff,
        }
    }

    /// Checks the parameters that do not depend on the particle system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("reduced_temperature", self.reduced_temperature)?;
        require_positive("max_displacement", self.max_displacement)?;
        require_positive("cutoff", self.cutoff)?;
        require_at_least_one("num_steps", self.num_steps)?;
        require_at_least_one("sampling_frequency", self.sampling_frequency)?;
        if let Some(frequency) = self.audit_frequency {
            require_at_least_one("audit_frequency", frequency)?;
        }
        Ok(())
    }

    /// Checks every parameter against the box and particle count of a run.
    pub fn validate_for(
        &self,
        simulation_box: &SimulationBox,
        num_particles: usize,
    ) -> Result<(), ConfigError> {
        self.validate()?;
        require_positive("box_length", simulation_box.edge_length)?;
        if self.cutoff >= simulation_box.half_length() {
            return Err(invalid(
                "cutoff",
                format!(
                    "must be smaller than half the box length ({}), got {}",
                    simulation_box.half_length(),
                    self.cutoff
                ),
            ));
        }
        if num_particles < 2 {
            return Err(invalid(
                "num_particles",
                format!("at least 2 particles are required, got {}", num_particles),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    reduced_temperature: Option<f64>,
    num_steps: Option<usize>,
    max_displacement: Option<f64>,
    cutoff: Option<f64>,
    sampling_frequency: Option<usize>,
    random_seed: Option<u64>,
    audit_frequency: Option<usize>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduced_temperature(mut self, temperature: f64) -> Self {
        self.reduced_temperature = Some(temperature);
        self
    }
    pub fn num_steps(mut self, steps: usize) -> Self {
        self.num_steps = Some(steps);
        self
    }
    pub fn max_displacement(mut self, displacement: f64) -> Self {
        self.max_displacement = Some(displacement);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn sampling_frequency(mut self, frequency: usize) -> Self {
        self.sampling_frequency = Some(frequency);
        self
    }
    pub fn random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }
    pub fn audit_frequency(mut self, frequency: Option<usize>) -> Self {
        self.audit_frequency = frequency;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            reduced_temperature: self
                .reduced_temperature
                .ok_or(ConfigError::MissingParameter("reduced_temperature"))?,
            num_steps: self
                .num_steps
                .ok_or(ConfigError::MissingParameter("num_steps"))?,
            max_displacement: self
                .max_displacement
                .ok_or(ConfigError::MissingParameter("max_displacement"))?,
            cutoff: self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?,
            sampling_frequency: self
                .sampling_frequency
                .ok_or(ConfigError::MissingParameter("sampling_frequency"))?,
            random_seed: self.random_seed,
            audit_frequency: self.audit_frequency,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
            .reduced_temperature(0.9)
            .num_steps(1000)
            .max_displacement(0.1)
            .cutoff(3.0)
            .sampling_frequency(100)
    }

    #[test]
    fn builder_produces_config_with_all_parameters() {
        let config = complete_builder()
            .random_seed(Some(7))
            .audit_frequency(Some(500))
            .build()
            .unwrap();

        assert_eq!(config.reduced_temperature, 0.9);
        assert_eq!(config.num_steps, 1000);
        assert_eq!(config.max_displacement, 0.1);
        assert_eq!(config.cutoff, 3.0);
        assert_eq!(config.sampling_frequency, 100);
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.audit_frequency, Some(500));
        assert_eq!(config.potential().cutoff, 3.0);
    }

    #[test]
    fn beta_is_inverse_temperature() {
        let config = complete_builder().reduced_temperature(2.0).build().unwrap();
        assert_eq!(config.beta(), 0.5);
    }

    #[test]
    fn builder_reports_missing_parameter() {
        let result = SimulationConfigBuilder::new()
            .reduced_temperature(0.9)
            .num_steps(10)
            .max_displacement(0.1)
            .sampling_frequency(1)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("cutoff")));
    }

    #[test]
    fn non_positive_values_are_rejected_not_clamped() {
        let cases = [
            complete_builder().reduced_temperature(0.0).build(),
            complete_builder().reduced_temperature(-1.0).build(),
            complete_builder().max_displacement(0.0).build(),
            complete_builder().cutoff(-3.0).build(),
            complete_builder().reduced_temperature(f64::NAN).build(),
            complete_builder().num_steps(0).build(),
            complete_builder().sampling_frequency(0).build(),
            complete_builder().audit_frequency(Some(0)).build(),
        ];
        for result in cases {
            assert!(matches!(result, Err(ConfigError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn cutoff_must_be_below_half_box_length() {
        let config = complete_builder().cutoff(5.0).build().unwrap();
        let err = config
            .validate_for(&SimulationBox::new(10.0), 10)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                parameter: "cutoff",
                ..
            }
        ));
        assert!(config.validate_for(&SimulationBox::new(10.1), 10).is_ok());
    }

    #[test]
    fn at_least_two_particles_are_required() {
        let config = complete_builder().build().unwrap();
        let err = config.validate_for(&SimulationBox::new(10.0), 1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                parameter: "num_particles",
                ..
            }
        ));
    }

    #[test]
    fn box_length_must_be_positive() {
        let config = complete_builder().build().unwrap();
        let err = config.validate_for(&SimulationBox::new(0.0), 5).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                parameter: "box_length",
                ..
            }
        ));
    }
}
