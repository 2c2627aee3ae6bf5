use crate::core::models::frame::Frame;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Frame at step {step} has {found} particles but {expected} labels were given")]
    LabelMismatch {
        step: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Serialize)]
struct EnergyRecord {
    step: usize,
    energy_per_particle: f64,
}

/// Writes `step,energy_per_particle` rows, one per frame, with a header line.
pub fn write_energy_history<W: Write>(
    frames: &[Frame],
    writer: W,
) -> Result<(), TrajectoryWriteError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for frame in frames {
        csv_writer.serialize(EnergyRecord {
            step: frame.step,
            energy_per_particle: frame.energy_per_particle,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_energy_history_to_path<P: AsRef<Path>>(
    frames: &[Frame],
    path: P,
) -> Result<(), TrajectoryWriteError> {
    let file = File::create(path)?;
    write_energy_history(frames, BufWriter::new(file))
}

/// Writes frames as a multi-frame XYZ file. The comment line of each frame
/// carries its step and energy per particle.
pub fn write_xyz_frames<W: Write>(
    frames: &[Frame],
    labels: &[String],
    writer: &mut W,
) -> Result<(), TrajectoryWriteError> {
    for frame in frames {
        if frame.num_particles() != labels.len() {
            return Err(TrajectoryWriteError::LabelMismatch {
                step: frame.step,
                expected: labels.len(),
                found: frame.num_particles(),
            });
        }
        writeln!(writer, "{}", frame.num_particles())?;
        writeln!(
            writer,
            "step={} energy_per_particle={}",
            frame.step, frame.energy_per_particle
        )?;
        for (label, p) in labels.iter().zip(frame.positions.iter()) {
            writeln!(writer, "{} {:.8} {:.8} {:.8}", label, p.x, p.y, p.z)?;
        }
    }
    Ok(())
}

pub fn write_xyz_frames_to_path<P: AsRef<Path>>(
    frames: &[Frame],
    labels: &[String],
    path: P,
) -> Result<(), TrajectoryWriteError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_xyz_frames(frames, labels, &mut writer)?;
    writer.flush()?;
    Ok(())
}
