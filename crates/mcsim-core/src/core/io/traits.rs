use crate::core::models::system::ParticleSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing particle coordinate formats.
pub trait ParticleFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a particle system from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<ParticleSystem, Self::Error>;

    /// Writes a particle system to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(system: &ParticleSystem, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a particle system from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ParticleSystem, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a particle system to a file path, creating or truncating it.
    fn write_to_path<P: AsRef<Path>>(system: &ParticleSystem, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(system, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
