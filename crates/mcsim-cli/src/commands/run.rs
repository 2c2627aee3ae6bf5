use crate::cli::RunArgs;
use crate::config::PartialRunConfig;
use crate::config::models::OutputPaths;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mcsim::{
    core::{
        geometry::calculate_rmsd,
        io::{
            coords::CoordinateFile,
            traits::ParticleFile,
            trajectory::{write_energy_history_to_path, write_xyz_frames_to_path},
        },
        models::system::ParticleSystem,
    },
    engine::{progress::ProgressReporter, state::SimulationResult},
    workflows,
};
use tracing::{info, warn};

pub fn run(args: RunArgs, echo_samples: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let app_config = partial_config.merge_with_cli(&args)?;

    info!("Loading starting configuration from {:?}", &app_config.input_path);
    let system = CoordinateFile::read_from_path(&app_config.input_path).map_err(|e| {
        CliError::FileParsing {
            path: app_config.input_path.clone(),
            source: e.into(),
        }
    })?;

    let progress_handler = CliProgressHandler::new().with_sample_echo(echo_samples);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Starting Monte Carlo run: {} particles, box length {}, T* = {}, {} steps...",
        system.num_particles(),
        system.box_length(),
        app_config.core_config.reduced_temperature,
        app_config.core_config.num_steps
    );
    info!("Invoking the core simulation workflow...");

    let result = workflows::simulate::run(&system, &app_config.core_config, &reporter)?;

    print_summary(&system, &result);
    write_outputs(&system, &result, &app_config.outputs)?;

    Ok(())
}

fn print_summary(system: &ParticleSystem, result: &SimulationResult) {
    if let Some(seed) = result.seed {
        println!("  Random seed:             {}", seed);
    }
    println!(
        "  Accepted moves:          {} / {} ({:.1}%)",
        result.statistics.accepted,
        result.statistics.attempted,
        100.0 * result.statistics.acceptance_ratio()
    );
    println!(
        "  Energy per particle:     {:.6} -> {:.6}",
        result.initial_energy / result.num_particles() as f64,
        result.final_energy_per_particle()
    );
    println!(
        "  Final energy drift:      {:.3e}",
        result.final_audit.drift()
    );
    if let Some(rmsd) = calculate_rmsd(
        system.configuration.positions(),
        result.final_configuration.positions(),
    ) {
        // Unwrapped coordinates, so this measures total travel rather than a periodic distance.
        println!("  RMS displacement:        {:.4}", rmsd);
    }
    if result.frames.is_empty() {
        warn!("No frames were recorded during the run.");
    }
}

fn write_outputs(
    system: &ParticleSystem,
    result: &SimulationResult,
    outputs: &OutputPaths,
) -> Result<()> {
    if let Some(path) = &outputs.final_configuration {
        info!("Writing final configuration to {:?}", path);
        let final_system = ParticleSystem::with_labels(
            system.simulation_box,
            result.final_configuration.clone(),
            system.labels.clone(),
        );
        CoordinateFile::write_to_path(&final_system, path).map_err(|e| {
            CliError::FileWriting {
                path: path.clone(),
                source: e.into(),
            }
        })?;
        println!("✓ Final configuration written to: {}", path.display());
    }

    if let Some(path) = &outputs.energies {
        info!("Writing {} energy samples to {:?}", result.frames.len(), path);
        write_energy_history_to_path(&result.frames, path).map_err(|e| CliError::FileWriting {
            path: path.clone(),
            source: e.into(),
        })?;
        println!("✓ Energy history written to: {}", path.display());
    }

    if let Some(path) = &outputs.trajectory {
        info!("Writing {} frames to {:?}", result.frames.len(), path);
        write_xyz_frames_to_path(&result.frames, &system.labels, path).map_err(|e| {
            CliError::FileWriting {
                path: path.clone(),
                source: e.into(),
            }
        })?;
        println!("✓ Trajectory written to: {}", path.display());
    }

    Ok(())
}
