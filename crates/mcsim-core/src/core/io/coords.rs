use crate::core::io::traits::ParticleFile;
use crate::core::models::configuration::{Configuration, SimulationBox};
use crate::core::models::system::ParticleSystem;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: CoordinateParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(&'static str),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateParseErrorKind {
    #[error("Invalid float for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Invalid integer for {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Expected {expected} whitespace-separated fields, found {found}")]
    WrongFieldCount { expected: usize, found: usize },
    #[error("Box length must be a positive finite number, got {0}")]
    InvalidBoxLength(f64),
}

const PARTICLE_FIELDS: usize = 4;
const RESERVE_LIMIT: usize = 1 << 16;

fn parse_float(line: usize, field: &'static str, value: &str) -> Result<f64, CoordinateError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError::Parse {
            line,
            kind: CoordinateParseErrorKind::InvalidFloat {
                field,
                value: value.to_string(),
            },
        })
}

/// The boxed coordinate format:
///
/// ```text
/// 10.0
/// 3
/// Ar 0.0 0.0 0.0
/// Ar 1.5 0.0 0.0
/// Ar 0.0 1.5 0.0
/// ```
///
/// The first line holds the cubic box edge length, the second the particle
/// count, and each following line a label and three reduced-unit coordinates.
pub struct CoordinateFile;

impl ParticleFile for CoordinateFile {
    type Error = CoordinateError;

    fn read_from(reader: &mut impl BufRead) -> Result<ParticleSystem, Self::Error> {
        let mut box_length: Option<f64> = None;
        let mut declared_count: Option<usize> = None;
        let mut positions = Vec::new();
        let mut labels = Vec::new();

        for (line_idx, line_res) in reader.lines().enumerate() {
            let line_num = line_idx + 1;
            let line = line_res?;
            let trimmed = line.trim();

            if box_length.is_none() {
                let value = parse_float(line_num, "box length", trimmed)?;
                if value <= 0.0 {
                    return Err(CoordinateError::Parse {
                        line: line_num,
                        kind: CoordinateParseErrorKind::InvalidBoxLength(value),
                    });
                }
                box_length = Some(value);
                continue;
            }

            if declared_count.is_none() {
                let count = trimmed.parse::<usize>().map_err(|_| CoordinateError::Parse {
                    line: line_num,
                    kind: CoordinateParseErrorKind::InvalidInt {
                        field: "particle count",
                        value: trimmed.to_string(),
                    },
                })?;
                // Declared count is untrusted until the records are counted.
                positions.reserve(count.min(RESERVE_LIMIT));
                labels.reserve(count.min(RESERVE_LIMIT));
                declared_count = Some(count);
                continue;
            }

            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != PARTICLE_FIELDS {
                return Err(CoordinateError::Parse {
                    line: line_num,
                    kind: CoordinateParseErrorKind::WrongFieldCount {
                        expected: PARTICLE_FIELDS,
                        found: fields.len(),
                    },
                });
            }

            let x = parse_float(line_num, "x coordinate", fields[1])?;
            let y = parse_float(line_num, "y coordinate", fields[2])?;
            let z = parse_float(line_num, "z coordinate", fields[3])?;
            labels.push(fields[0].to_string());
            positions.push(Point3::new(x, y, z));
        }

        let box_length = box_length.ok_or(CoordinateError::MissingRecord("box length"))?;
        let declared_count =
            declared_count.ok_or(CoordinateError::MissingRecord("particle count"))?;

        if positions.len() != declared_count {
            return Err(CoordinateError::Inconsistency(format!(
                "header declares {} particles but {} coordinate lines were found",
                declared_count,
                positions.len()
            )));
        }

        Ok(ParticleSystem::with_labels(
            SimulationBox::new(box_length),
            Configuration::new(positions),
            labels,
        ))
    }

    fn write_to(system: &ParticleSystem, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", system.box_length())?;
        writeln!(writer, "{}", system.num_particles())?;
        for (i, p) in system.configuration.positions().iter().enumerate() {
            writeln!(writer, "{} {} {} {}", system.label(i), p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
