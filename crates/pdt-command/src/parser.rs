//! Tokenizer for typed commands.
//!
//! The grammar is `<Op><Mode><v0>[,<v1>[,<v2>]]`. Letters are
//! case-insensitive, values are comma-separated and blank or unparsable
//! values read as `0`. A handful of whole-word commands (`J2V`, `AD2`,
//! `CINT`, ...) are recognised before the general grammar.

use pdt_core::{PdtError, Result};

use crate::operation::{FilletMode, MathsTarget, Mode, Operation, PlacementKind};

/// A coordinate command: operation, mode and its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub operation: Operation,
    pub mode: Mode,
    /// Exactly [`Mode::value_count`] values.
    pub values: Vec<f64>,
}

impl Command {
    /// Returns the first three values, padding with zeros.
    pub fn xyz(&self) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (slot, value) in out.iter_mut().zip(&self.values) {
            *slot = *value;
        }
        out
    }
}

/// Whole-word commands that take no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    /// `J2V`: join two vertices with an edge.
    JoinVertices,
    /// `AD2`: distance and plane angle between two points.
    Measure2d,
    /// `AD3`: angle at the middle of three points.
    Measure3d,
    /// `OTC`: move the active object's origin to the cursor.
    OriginToCursor,
}

/// Result of tokenizing one command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// `?` or `HELP`.
    Help,
    Special(Special),
    Placement {
        target: Operation,
        kind: PlacementKind,
    },
    Coordinates(Command),
    Fillet {
        mode: FilletMode,
        values: [f64; 3],
    },
    Maths {
        target: MathsTarget,
        expression: String,
    },
}

/// Tokenizes a command line.
///
/// Fails with the first validation error found: length, operation letter,
/// mode letter and then value count.
pub fn parse(input: &str) -> Result<Parsed> {
    let command = input.trim();
    if command.is_empty() {
        return Err(PdtError::TooShortCommand);
    }

    let upper = command.to_ascii_uppercase();
    match upper.as_str() {
        "?" | "HELP" => return Ok(Parsed::Help),
        "J2V" => return Ok(Parsed::Special(Special::JoinVertices)),
        "AD2" => return Ok(Parsed::Special(Special::Measure2d)),
        "AD3" => return Ok(Parsed::Special(Special::Measure3d)),
        "OTC" => return Ok(Parsed::Special(Special::OriginToCursor)),
        _ => {}
    }
    if let Some(placement) = parse_placement(&upper) {
        return Ok(placement);
    }

    let mut chars = command.chars();
    let (Some(op_letter), Some(mode_letter)) = (chars.next(), chars.next()) else {
        return Err(PdtError::TooShortCommand);
    };
    let rest = chars.as_str();
    if rest.is_empty() {
        return Err(PdtError::TooShortCommand);
    }

    let operation = Operation::from_letter(op_letter)
        .ok_or(PdtError::UnknownOperation(op_letter.to_ascii_uppercase()))?;
    let bad_mode = || PdtError::UnknownMode {
        operation: operation.letter(),
        mode: mode_letter.to_ascii_uppercase(),
    };

    match operation {
        Operation::Maths => {
            let target = MathsTarget::from_letter(mode_letter).ok_or_else(bad_mode)?;
            Ok(Parsed::Maths {
                target,
                expression: rest.trim().to_string(),
            })
        }
        Operation::Fillet => {
            let mode = FilletMode::from_letter(mode_letter).ok_or_else(bad_mode)?;
            let values = parse_values(rest, FilletMode::VALUE_COUNT)?;
            Ok(Parsed::Fillet {
                mode,
                values: [values[0], values[1], values[2]],
            })
        }
        _ => {
            let mode = Mode::from_letter(mode_letter)
                .filter(|mode| operation.coordinate_modes().contains(mode))
                .ok_or_else(bad_mode)?;
            let values = parse_values(rest, mode.value_count())?;
            Ok(Parsed::Coordinates(Command {
                operation,
                mode,
                values,
            }))
        }
    }
}

fn parse_placement(upper: &str) -> Option<Parsed> {
    let mut chars = upper.chars();
    let target = Operation::from_letter(chars.next()?)?;
    let kind = PlacementKind::from_suffix(chars.as_str())?;
    target
        .is_placement_target()
        .then_some(Parsed::Placement { target, kind })
}

/// Splits comma-separated values, checking the count.
///
/// Only the number of fields is an error; each field that is blank or not a
/// finite number reads as `0`.
pub fn parse_values(text: &str, expected: usize) -> Result<Vec<f64>> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != expected {
        return Err(PdtError::WrongValueCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields.into_iter().map(parse_value).collect())
}

fn parse_value(field: &str) -> f64 {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            if !field.is_empty() {
                log::debug!("value '{field}' is not a number, using 0");
            }
            0.0
        }
    }
}
