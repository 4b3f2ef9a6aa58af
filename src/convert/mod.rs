//! Unit conversion for the `convert` command.
//!
//! Linear conversions are table driven: each entry is a forward factor,
//! and the reverse direction divides by it. Temperatures need an offset
//! and are handled separately.

use std::fmt;
use std::str::FromStr;

/// Errors raised by [`convert`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("Unknown conversion type '{0}'. Expected one of: length, weight, temp")]
    UnknownKind(String),

    #[error("Unsupported conversion: {kind} {from} to {to}")]
    Unsupported {
        kind: UnitKind,
        from: String,
        to: String,
    },
}

/// Family of units a conversion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Length,
    Weight,
    Temp,
}

impl FromStr for UnitKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "length" => Ok(UnitKind::Length),
            "weight" => Ok(UnitKind::Weight),
            "temp" | "temperature" => Ok(UnitKind::Temp),
            other => Err(ConvertError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Length => write!(f, "length"),
            UnitKind::Weight => write!(f, "weight"),
            UnitKind::Temp => write!(f, "temp"),
        }
    }
}

/// `(kind, from, to, factor)`: `value_in_to = value_in_from * factor`.
const FACTORS: &[(UnitKind, &str, &str, f64)] = &[
    (UnitKind::Length, "km", "mi", 0.621371),
    (UnitKind::Length, "m", "ft", 3.28084),
    (UnitKind::Length, "cm", "in", 0.393701),
    (UnitKind::Weight, "kg", "lb", 2.20462),
    (UnitKind::Weight, "g", "oz", 0.035274),
];

/// Converts `value` from `from` to `to` within `kind`.
///
/// Unit names are case-insensitive (`km`, `KM`; `c`, `C`).
pub fn convert(kind: UnitKind, value: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
    let (from_lc, to_lc) = (from.to_lowercase(), to.to_lowercase());
    let unsupported = || ConvertError::Unsupported {
        kind,
        from: from.to_string(),
        to: to.to_string(),
    };

    if kind == UnitKind::Temp {
        return match (from_lc.as_str(), to_lc.as_str()) {
            ("c", "f") => Ok(value * 9.0 / 5.0 + 32.0),
            ("f", "c") => Ok((value - 32.0) * 5.0 / 9.0),
            _ => Err(unsupported()),
        };
    }

    for &(k, f, t, factor) in FACTORS {
        if k != kind {
            continue;
        }
        if f == from_lc && t == to_lc {
            return Ok(value * factor);
        }
        if t == from_lc && f == to_lc {
            return Ok(value / factor);
        }
    }

    Err(unsupported())
}

/// Lists the supported conversions, one `kind: from <-> to` per entry.
pub fn supported() -> Vec<String> {
    let mut out: Vec<String> = FACTORS
        .iter()
        .map(|(kind, from, to, _)| format!("{kind}: {from} <-> {to}"))
        .collect();
    out.push(format!("{}: C <-> F", UnitKind::Temp));
    out
}
