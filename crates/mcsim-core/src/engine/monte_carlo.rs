use super::acceptance::metropolis_criterion;
use super::config::SimulationConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::state::{EnergyAudit, MoveOutcome, Phase, RunState, SimulationResult};
use super::trajectory::TrajectoryRecorder;
use super::transaction;
use crate::core::forcefield::params::EnergyModel;
use crate::core::models::configuration::{Configuration, SimulationBox};
use crate::core::models::frame::Frame;
use crate::core::models::system::ParticleSystem;
use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, trace, warn};

/// Relative drift between running and recomputed energy tolerated by audits.
pub const AUDIT_RELATIVE_TOLERANCE: f64 = 1e-6;

/// Metropolis Monte Carlo sampler for one canonical-ensemble chain.
///
/// The engine exclusively owns the configuration, the running energy and the
/// random stream. Every iteration consumes, in order, one uniform draw for the
/// particle index, one for each of the three displacement components and, for
/// uphill moves only, one for the acceptance test.
pub struct MonteCarlo<R: Rng = ChaCha8Rng> {
    config: SimulationConfig,
    model: EnergyModel,
    beta: f64,
    initial_energy: f64,
    configuration: Configuration,
    state: RunState,
    recorder: TrajectoryRecorder,
    rng: R,
    seed: Option<u64>,
}

impl MonteCarlo<ChaCha8Rng> {
    /// Builds an engine seeded from `config.random_seed`, or from entropy when
    /// no seed is configured. The seed in use is logged and kept in the result.
    pub fn new(system: &ParticleSystem, config: SimulationConfig) -> Result<Self, EngineError> {
        let seed = match config.random_seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                info!(seed, "No random seed configured; drew one from entropy.");
                seed
            }
        };
        let mut engine = Self::with_rng(
            system.simulation_box,
            system.configuration.clone(),
            config,
            ChaCha8Rng::seed_from_u64(seed),
        )?;
        engine.seed = Some(seed);
        Ok(engine)
    }
}

impl<R: Rng> MonteCarlo<R> {
    /// Builds an engine drawing from a caller-supplied random stream.
    ///
    /// All parameters are validated against the box and particle count, and
    /// the running energy is seeded with the full pairwise sum plus the tail
    /// correction.
    pub fn with_rng(
        simulation_box: SimulationBox,
        configuration: Configuration,
        config: SimulationConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        config.validate_for(&simulation_box, configuration.len())?;

        let model = EnergyModel::from_parts(&simulation_box, &config.potential());
        let initial_energy = model.system_energy(configuration.positions())?;
        debug!(
            initial_energy,
            tail_correction = model.tail_correction(configuration.len()),
            "Seeded running energy."
        );

        Ok(Self {
            beta: config.beta(),
            recorder: TrajectoryRecorder::new(config.sampling_frequency),
            state: RunState::new(initial_energy),
            config,
            model,
            initial_energy,
            configuration,
            rng,
            seed: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    #[inline]
    pub fn energy_model(&self) -> &EnergyModel {
        &self.model
    }

    #[inline]
    pub fn running_energy(&self) -> f64 {
        self.state.running_energy
    }

    #[inline]
    pub fn initial_energy(&self) -> f64 {
        self.initial_energy
    }

    #[inline]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        self.recorder.frames()
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn remaining_steps(&self) -> usize {
        self.config.num_steps - self.state.step
    }

    /// Performs one propose / evaluate / accept-or-reject iteration and
    /// records a frame if the step falls on the sampling cadence.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Completed`] once the step budget is exhausted, and
    /// [`EngineError::Energy`] when a trial position coincides with another
    /// particle. In the latter case the trial move has already been reverted.
    pub fn step(&mut self) -> Result<MoveOutcome, EngineError> {
        if self.state.step >= self.config.num_steps {
            self.state.phase = Phase::Done;
            return Err(EngineError::Completed {
                steps: self.config.num_steps,
            });
        }
        self.state.phase = Phase::Running;

        let step = self.state.step;
        let particle = self.select_particle();
        let before = self.model.pair_energy(self.configuration.positions(), particle)?;

        let max = self.config.max_displacement;
        let displacement = Vector3::new(
            self.uniform_displacement(max),
            self.uniform_displacement(max),
            self.uniform_displacement(max),
        );

        let model = &self.model;
        let beta = self.beta;
        let rng = &mut self.rng;
        let mut delta = 0.0;
        let accepted = transaction::with_trial_move(
            &mut self.configuration,
            particle,
            displacement,
            |trial| -> Result<bool, EngineError> {
                let after = model.pair_energy(trial.positions(), particle)?;
                delta = after - before;
                Ok(metropolis_criterion(delta, beta, rng))
            },
        )?;

        self.state.statistics.attempted += 1;
        if accepted {
            self.state.running_energy += delta;
            self.state.statistics.accepted += 1;
        }
        trace!(step, particle, delta, accepted, "Trial move resolved.");

        let sampled = self
            .recorder
            .maybe_record(step, self.state.running_energy, &self.configuration)
            .is_some();

        self.state.step += 1;
        if self.state.step == self.config.num_steps {
            self.state.phase = Phase::Done;
        }

        Ok(MoveOutcome {
            step,
            particle,
            delta,
            accepted,
            sampled,
        })
    }

    /// Uniform index in `[0, N)` from exactly one `f64` draw.
    fn select_particle(&mut self) -> usize {
        let n = self.configuration.len();
        let u: f64 = self.rng.r#gen();
        ((u * n as f64) as usize).min(n - 1)
    }

    /// Uniform value in `[-max, max)` from exactly one `f64` draw.
    fn uniform_displacement(&mut self, max: f64) -> f64 {
        let u: f64 = self.rng.r#gen();
        max * (2.0 * u - 1.0)
    }

    /// Runs every remaining step, reporting samples through `reporter` and
    /// auditing the running energy at the configured audit cadence.
    #[instrument(
        skip_all,
        name = "monte_carlo_run",
        fields(num_particles = self.configuration.len())
    )]
    pub fn run(&mut self, reporter: &ProgressReporter) -> Result<(), EngineError> {
        if self.state.phase == Phase::Done {
            return Err(EngineError::Completed {
                steps: self.config.num_steps,
            });
        }

        let remaining = self.remaining_steps();
        info!(
            steps = remaining,
            temperature = self.config.reduced_temperature,
            max_displacement = self.config.max_displacement,
            cutoff = self.config.cutoff,
            "Starting Monte Carlo sampling."
        );
        reporter.report(Progress::TaskStart {
            total_steps: remaining as u64,
        });

        let mut last_reported = self.state.step;
        while self.state.step < self.config.num_steps {
            let outcome = self.step()?;

            if outcome.sampled {
                let energy_per_particle =
                    self.state.running_energy / self.configuration.len() as f64;
                debug!(step = outcome.step, energy_per_particle, "Sampled configuration.");
                reporter.report(Progress::Sample {
                    step: outcome.step,
                    energy_per_particle,
                });
                reporter.report(Progress::TaskAdvance {
                    steps: (self.state.step - last_reported) as u64,
                });
                last_reported = self.state.step;
            }

            if let Some(frequency) = self.config.audit_frequency {
                if outcome.step % frequency == 0 {
                    self.audit_and_log()?;
                }
            }
        }

        if self.state.step > last_reported {
            reporter.report(Progress::TaskAdvance {
                steps: (self.state.step - last_reported) as u64,
            });
        }
        reporter.report(Progress::TaskFinish);

        info!(
            final_energy = self.state.running_energy,
            acceptance_ratio = self.state.statistics.acceptance_ratio(),
            "Monte Carlo sampling finished."
        );
        Ok(())
    }

    /// Recomputes the total energy from scratch and compares it with the
    /// running energy.
    pub fn audit_energy(&self) -> Result<EnergyAudit, EngineError> {
        let recomputed = self.model.system_energy(self.configuration.positions())?;
        Ok(EnergyAudit {
            step: self.state.step,
            running: self.state.running_energy,
            recomputed,
        })
    }

    fn audit_and_log(&self) -> Result<EnergyAudit, EngineError> {
        let audit = self.audit_energy()?;
        if audit.is_within(AUDIT_RELATIVE_TOLERANCE) {
            debug!(step = audit.step, drift = audit.drift(), "Energy audit passed.");
        } else {
            warn!(
                step = audit.step,
                running = audit.running,
                recomputed = audit.recomputed,
                drift = audit.drift(),
                "Running energy drifted from the recomputed total."
            );
        }
        Ok(audit)
    }

    /// Consumes the engine, auditing the final energy once more.
    pub fn finish(self) -> Result<SimulationResult, EngineError> {
        let final_audit = self.audit_and_log()?;
        Ok(SimulationResult {
            seed: self.seed,
            initial_energy: self.initial_energy,
            final_energy: self.state.running_energy,
            statistics: self.state.statistics,
            frames: self.recorder.into_frames(),
            final_configuration: self.configuration,
            final_audit,
        })
    }
}
