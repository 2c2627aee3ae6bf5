use mcsim::engine::config::SimulationConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputPaths {
    pub final_configuration: Option<PathBuf>,
    pub energies: Option<PathBuf>,
    pub trajectory: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub outputs: OutputPaths,
    pub core_config: SimulationConfig,
}
