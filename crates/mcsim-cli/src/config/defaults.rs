/// Values used for any simulation parameter that is set neither on the
/// command line nor in the configuration file.
pub struct DefaultsConfig {
    pub reduced_temperature: f64,
    pub num_steps: usize,
    pub max_displacement: f64,
    pub cutoff: f64,
    pub sampling_frequency: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            reduced_temperature: 0.9,
            num_steps: 1_000_000,
            max_displacement: 0.1,
            cutoff: 3.0,
            sampling_frequency: 1000,
        }
    }
}
