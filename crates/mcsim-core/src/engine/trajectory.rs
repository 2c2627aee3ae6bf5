use crate::core::models::configuration::Configuration;
use crate::core::models::frame::Frame;

/// Append-only record of sampled frames taken every `frequency` steps,
/// starting with step 0.
#[derive(Debug, Clone)]
pub struct TrajectoryRecorder {
    frequency: usize,
    frames: Vec<Frame>,
}

impl TrajectoryRecorder {
    /// Panics if `frequency` is zero.
    pub fn new(frequency: usize) -> Self {
        assert!(frequency > 0, "sampling frequency must be at least 1");
        Self {
            frequency,
            frames: Vec::new(),
        }
    }

    #[inline]
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    #[inline]
    pub fn is_sampling_step(&self, step: usize) -> bool {
        step % self.frequency == 0
    }

    /// Appends a frame holding a copy of the current positions.
    pub fn record(&mut self, step: usize, energy_per_particle: f64, configuration: &Configuration) {
        self.frames
            .push(Frame::new(step, energy_per_particle, configuration.snapshot()));
    }

    /// Records a frame if `step` falls on the sampling cadence.
    pub fn maybe_record(
        &mut self,
        step: usize,
        total_energy: f64,
        configuration: &Configuration,
    ) -> Option<&Frame> {
        if !self.is_sampling_step(step) || configuration.is_empty() {
            return None;
        }
        let per_particle = total_energy / configuration.len() as f64;
        self.record(step, per_particle, configuration);
        self.frames.last()
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn steps(&self) -> Vec<usize> {
        self.frames.iter().map(|f| f.step).collect()
    }

    pub fn energies(&self) -> Vec<f64> {
        self.frames.iter().map(|f| f.energy_per_particle).collect()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}
