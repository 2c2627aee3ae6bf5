use crate::core::models::configuration::Configuration;
use crate::core::models::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveStatistics {
    pub attempted: usize,
    pub accepted: usize,
}

impl MoveStatistics {
    #[inline]
    pub fn rejected(&self) -> usize {
        self.attempted - self.accepted
    }

    /// Fraction of attempted moves that were accepted, or 0 before any attempt.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}

/// Mutable bookkeeping of a chain. `running_energy` is updated incrementally
/// by accepted moves and always includes the tail correction.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub running_energy: f64,
    pub step: usize,
    pub phase: Phase,
    pub statistics: MoveStatistics,
}

impl RunState {
    pub fn new(initial_energy: f64) -> Self {
        Self {
            running_energy: initial_energy,
            step: 0,
            phase: Phase::Idle,
            statistics: MoveStatistics::default(),
        }
    }
}

/// Result of one Monte Carlo iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub step: usize,
    pub particle: usize,
    pub delta: f64,
    pub accepted: bool,
    pub sampled: bool,
}

/// Comparison of the incrementally maintained energy with a from-scratch
/// recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyAudit {
    pub step: usize,
    pub running: f64,
    pub recomputed: f64,
}

impl EnergyAudit {
    #[inline]
    pub fn drift(&self) -> f64 {
        self.running - self.recomputed
    }

    /// Whether the drift is within `relative_tolerance * max(1, |recomputed|)`.
    pub fn is_within(&self, relative_tolerance: f64) -> bool {
        self.drift().abs() <= relative_tolerance * self.recomputed.abs().max(1.0)
    }
}

/// Everything a finished chain hands back to its caller.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub seed: Option<u64>,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub final_configuration: Configuration,
    pub frames: Vec<Frame>,
    pub statistics: MoveStatistics,
    pub final_audit: EnergyAudit,
}

impl SimulationResult {
    #[inline]
    pub fn num_particles(&self) -> usize {
        self.final_configuration.len()
    }

    /// Final running energy divided by the particle count.
    pub fn final_energy_per_particle(&self) -> f64 {
        self.final_energy / self.num_particles() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_report_rejections_and_ratio() {
        let stats = MoveStatistics {
            attempted: 8,
            accepted: 6,
        };
        assert_eq!(stats.rejected(), 2);
        assert_eq!(stats.acceptance_ratio(), 0.75);
        assert_eq!(MoveStatistics::default().acceptance_ratio(), 0.0);
    }

    #[test]
    fn audit_tolerance_scales_with_energy_magnitude() {
        let audit = EnergyAudit {
            step: 10,
            running: -1000.0005,
            recomputed: -1000.0,
        };
        assert!((audit.drift() + 0.0005).abs() < 1e-9);
        assert!(audit.is_within(1e-6));
        assert!(!audit.is_within(1e-7));

        let small = EnergyAudit {
            step: 0,
            running: 1e-7,
            recomputed: 0.0,
        };
        assert!(small.is_within(1e-6));
    }

    #[test]
    fn new_run_state_starts_idle_at_step_zero() {
        let state = RunState::new(-3.5);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.step, 0);
        assert_eq!(state.running_energy, -3.5);
        assert_eq!(state.statistics, MoveStatistics::default());
    }
}
