use crate::core::models::system::ParticleSystem;
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::monte_carlo::MonteCarlo;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::SimulationResult;
use tracing::{info, instrument};

/// Runs one Monte Carlo chain over `system` with `config` and returns the
/// sampled trajectory, the final configuration and the final energy.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(
    system: &ParticleSystem,
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<SimulationResult, EngineError> {
    // === Phase 1: Validation and initial energy ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    info!(
        num_particles = system.num_particles(),
        box_length = system.box_length(),
        density = system.simulation_box.density(system.num_particles()),
        "Preparing Monte Carlo engine."
    );
    let mut engine = MonteCarlo::new(system, config.clone())?;
    info!(
        initial_energy = engine.initial_energy(),
        seed = engine.seed(),
        "Initial energy computed."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Sampling ===
    reporter.report(Progress::PhaseStart { name: "Sampling" });
    engine.run(reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Final audit ===
    let result = engine.finish()?;
    reporter.report(Progress::Message(format!(
        "Acceptance ratio {:.3}, final energy per particle {:.6}",
        result.statistics.acceptance_ratio(),
        result.final_energy_per_particle()
    )));
    info!(
        final_energy = result.final_energy,
        drift = result.final_audit.drift(),
        frames = result.frames.len(),
        "Simulation workflow finished."
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::configuration::{Configuration, SimulationBox};
    use crate::engine::config::SimulationConfigBuilder;
    use crate::engine::monte_carlo::AUDIT_RELATIVE_TOLERANCE;
    use nalgebra::Point3;
    use std::sync::{Arc, Mutex};

    fn system() -> ParticleSystem {
        ParticleSystem::new(
            SimulationBox::new(8.0),
            Configuration::new(vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(2.2, 1.0, 1.0),
                Point3::new(1.0, 2.2, 1.0),
                Point3::new(4.0, 4.0, 4.0),
            ]),
            "Ar",
        )
    }

    fn config(seed: Option<u64>) -> SimulationConfig {
        SimulationConfigBuilder::new()
            .reduced_temperature(1.2)
            .num_steps(300)
            .max_displacement(0.15)
            .cutoff(3.0)
            .sampling_frequency(50)
            .random_seed(seed)
            .audit_frequency(Some(100))
            .build()
            .unwrap()
    }

    #[test]
    fn workflow_returns_frames_statistics_and_audited_energy() {
        let result = run(&system(), &config(Some(5)), &ProgressReporter::new()).unwrap();

        assert_eq!(result.seed, Some(5));
        assert_eq!(result.frames.len(), 6);
        assert_eq!(result.statistics.attempted, 300);
        assert_eq!(result.num_particles(), 4);
        assert!(result.final_audit.is_within(AUDIT_RELATIVE_TOLERANCE));
        assert_eq!(result.frames[0].step, 0);
    }

    #[test]
    fn workflow_draws_and_reports_a_seed_when_none_is_configured() {
        let result = run(&system(), &config(None), &ProgressReporter::new()).unwrap();
        assert!(result.seed.is_some());
    }

    #[test]
    fn workflow_reports_phases_in_order() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let sink = phases.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::PhaseStart { name } = event {
                sink.lock().unwrap().push(name);
            }
        }));

        run(&system(), &config(Some(1)), &reporter).unwrap();
        assert_eq!(*phases.lock().unwrap(), vec!["Preparation", "Sampling"]);
    }

    #[test]
    fn workflow_fails_fast_on_invalid_cutoff() {
        let mut bad = config(Some(1));
        bad.cutoff = 4.0;
        let err = run(&system(), &bad, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
