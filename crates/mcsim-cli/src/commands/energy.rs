use crate::cli::EnergyArgs;
use crate::error::{CliError, Result};
use mcsim::core::forcefield::params::{EnergyBreakdown, EnergyModel};
use mcsim::core::io::{coords::CoordinateFile, traits::ParticleFile};
use mcsim::core::models::system::ParticleSystem;
use mcsim::engine::error::EngineError;
use tracing::info;

pub fn run(args: EnergyArgs) -> Result<()> {
    info!("Loading configuration from {:?}", &args.input);
    let system =
        CoordinateFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;

    let breakdown = evaluate(&system, args.cutoff)?;
    let n = system.num_particles() as f64;

    println!("Particles:            {}", system.num_particles());
    println!("Box length:           {}", system.box_length());
    println!("Cutoff:               {}", args.cutoff);
    println!("Pairwise energy:      {:.6}", breakdown.pairwise);
    println!("Tail correction:      {:.6}", breakdown.tail);
    println!("Total energy:         {:.6}", breakdown.total());
    println!("Energy per particle:  {:.6}", breakdown.total() / n);

    Ok(())
}

fn evaluate(system: &ParticleSystem, cutoff: f64) -> Result<EnergyBreakdown> {
    if !cutoff.is_finite() || cutoff <= 0.0 {
        return Err(CliError::Argument(format!(
            "cutoff must be a positive finite number, got {}",
            cutoff
        )));
    }
    if cutoff >= system.simulation_box.half_length() {
        return Err(CliError::Argument(format!(
            "cutoff {} must be smaller than half the box length ({})",
            cutoff,
            system.simulation_box.half_length()
        )));
    }
    if system.num_particles() == 0 {
        return Err(CliError::Argument(
            "configuration contains no particles".to_string(),
        ));
    }

    let model = EnergyModel::new(system.box_length(), cutoff);
    model
        .breakdown(system.configuration.positions())
        .map_err(|source| CliError::Simulation(EngineError::Energy { source }))
}
