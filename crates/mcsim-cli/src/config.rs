pub mod defaults;
pub mod models;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use mcsim::engine::config::SimulationConfigBuilder;
use models::{AppConfig, OutputPaths};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialSimulationConfig {
    reduced_temperature: Option<f64>,
    num_steps: Option<usize>,
    max_displacement: Option<f64>,
    cutoff: Option<f64>,
    sampling_frequency: Option<usize>,
    seed: Option<u64>,
    audit_frequency: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialOutputConfig {
    final_configuration: Option<PathBuf>,
    energies: Option<PathBuf>,
    trajectory: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    simulation: Option<PartialSimulationConfig>,
    output: Option<PartialOutputConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolves every parameter with the precedence CLI flag, then `--set`,
    /// then the file, then [`DefaultsConfig`].
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;

        let sim = self.simulation.take().unwrap_or_default();
        let out = self.output.take().unwrap_or_default();
        let defaults = DefaultsConfig::default();

        let core_config = SimulationConfigBuilder::new()
            .reduced_temperature(
                args.temperature
                    .or(sim.reduced_temperature)
                    .unwrap_or(defaults.reduced_temperature),
            )
            .num_steps(args.steps.or(sim.num_steps).unwrap_or(defaults.num_steps))
            .max_displacement(
                args.max_displacement
                    .or(sim.max_displacement)
                    .unwrap_or(defaults.max_displacement),
            )
            .cutoff(args.cutoff.or(sim.cutoff).unwrap_or(defaults.cutoff))
            .sampling_frequency(
                args.sampling_frequency
                    .or(sim.sampling_frequency)
                    .unwrap_or(defaults.sampling_frequency),
            )
            .random_seed(args.seed.or(sim.seed))
            .audit_frequency(args.audit_frequency.or(sim.audit_frequency))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let outputs = OutputPaths {
            final_configuration: args.output.clone().or(out.final_configuration),
            energies: args.energies.clone().or(out.energies),
            trajectory: args.trajectory.clone().or(out.trajectory),
        };

        Ok(AppConfig {
            input_path: args.input.clone(),
            outputs,
            core_config,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();

            match key.split_once('.') {
                Some(("simulation", field)) => {
                    let sim = self.simulation.get_or_insert_with(Default::default);
                    match field {
                        "reduced-temperature" => {
                            sim.reduced_temperature = Some(parse_value(key, value, "float")?)
                        }
                        "num-steps" => sim.num_steps = Some(parse_value(key, value, "integer")?),
                        "max-displacement" => {
                            sim.max_displacement = Some(parse_value(key, value, "float")?)
                        }
                        "cutoff" => sim.cutoff = Some(parse_value(key, value, "float")?),
                        "sampling-frequency" => {
                            sim.sampling_frequency = Some(parse_value(key, value, "integer")?)
                        }
                        "seed" => sim.seed = Some(parse_value(key, value, "integer")?),
                        "audit-frequency" => {
                            sim.audit_frequency = Some(parse_value(key, value, "integer")?)
                        }
                        _ => return Err(unsupported_key(key)),
                    }
                }
                Some(("output", field)) => {
                    let out = self.output.get_or_insert_with(Default::default);
                    let path = Some(PathBuf::from(value.trim()));
                    match field {
                        "final-configuration" => out.final_configuration = path,
                        "energies" => out.energies = path,
                        "trajectory" => out.trajectory = path,
                        _ => return Err(unsupported_key(key)),
                    }
                }
                _ => return Err(unsupported_key(key)),
            }
        }
        Ok(())
    }
}

fn unsupported_key(key: &str) -> CliError {
    CliError::Config(format!(
        "Unsupported configuration key for --set: '{}'",
        key
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["mcsim", "run", "-i", "start.txt"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Run(args) => args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    #[test]
    fn defaults_fill_unset_parameters() {
        let config = PartialRunConfig::default()
            .merge_with_cli(&run_args(&[]))
            .unwrap();
        let defaults = DefaultsConfig::default();

        assert_eq!(config.input_path, PathBuf::from("start.txt"));
        assert_eq!(
            config.core_config.reduced_temperature,
            defaults.reduced_temperature
        );
        assert_eq!(config.core_config.num_steps, defaults.num_steps);
        assert_eq!(config.core_config.max_displacement, defaults.max_displacement);
        assert_eq!(config.core_config.cutoff, defaults.cutoff);
        assert_eq!(
            config.core_config.sampling_frequency,
            defaults.sampling_frequency
        );
        assert_eq!(config.core_config.random_seed, None);
        assert_eq!(config.core_config.audit_frequency, None);
        assert_eq!(config.outputs, OutputPaths::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = write_config_file(
            "file_values.toml",
            r#"
            [simulation]
            reduced-temperature = 1.2
            num-steps = 5000
            max-displacement = 0.2
            cutoff = 2.5
            sampling-frequency = 100
            seed = 7
            audit-frequency = 1000

            [output]
            energies = "energies.csv"
            trajectory = "traj.xyz"
            "#,
        );

        let config = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&run_args(&[]))
            .unwrap();

        assert_eq!(config.core_config.reduced_temperature, 1.2);
        assert_eq!(config.core_config.num_steps, 5000);
        assert_eq!(config.core_config.max_displacement, 0.2);
        assert_eq!(config.core_config.cutoff, 2.5);
        assert_eq!(config.core_config.sampling_frequency, 100);
        assert_eq!(config.core_config.random_seed, Some(7));
        assert_eq!(config.core_config.audit_frequency, Some(1000));
        assert_eq!(
            config.outputs.energies,
            Some(PathBuf::from("energies.csv"))
        );
        assert_eq!(config.outputs.trajectory, Some(PathBuf::from("traj.xyz")));
        assert_eq!(config.outputs.final_configuration, None);
    }

    #[test]
    fn cli_flags_override_set_values_which_override_file() {
        let path = write_config_file(
            "precedence.toml",
            r#"
            [simulation]
            reduced-temperature = 1.2
            num-steps = 5000
            cutoff = 2.5
            "#,
        );

        let args = run_args(&[
            "--temperature",
            "2.0",
            "-S",
            "simulation.reduced-temperature=1.5",
            "-S",
            "simulation.num-steps=42",
            "-S",
            "output.final-configuration=final.txt",
        ]);
        let config = PartialRunConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.core_config.reduced_temperature, 2.0);
        assert_eq!(config.core_config.num_steps, 42);
        assert_eq!(config.core_config.cutoff, 2.5);
        assert_eq!(
            config.outputs.final_configuration,
            Some(PathBuf::from("final.txt"))
        );
    }

    #[test]
    fn unknown_keys_in_file_are_rejected() {
        let path = write_config_file(
            "unknown.toml",
            r#"
            [simulation]
            temperature = 1.0
            "#,
        );
        let result = PartialRunConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn unknown_tables_in_file_are_rejected() {
        assert!(PartialRunConfig::from_toml_str("[forcefield]\ncutoff = 2.0\n").is_err());
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let cases = [
            "simulation.num-steps",
            "simulation.num-steps=many",
            "simulation.pressure=1.0",
            "analysis.rdf=true",
        ];
        for case in cases {
            let result = PartialRunConfig::default().merge_with_cli(&run_args(&["-S", case]));
            assert!(matches!(result, Err(CliError::Config(_))), "case {}", case);
        }
    }

    #[test]
    fn invalid_parameter_values_surface_as_config_errors() {
        let result = PartialRunConfig::default().merge_with_cli(&run_args(&["--temperature", "0"]));
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("reduced_temperature")),
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }
}
