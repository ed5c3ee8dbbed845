// src/load/value.rs
use calamine::Data;
use chrono::NaiveDateTime;
use std::fmt;

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Floats at or above this magnitude keep their float rendering even when whole.
const WHOLE_FLOAT_LIMIT: f64 = 1e15;

/// A single non-empty cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Convert a calamine cell into the "no value" sentinel or a value.
    /// Empty cells and empty strings both map to `None`.
    pub fn from_data(data: &Data) -> Option<Self> {
        match data {
            Data::Empty => None,
            Data::String(s) if s.is_empty() => None,
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Int(i) => Some(CellValue::Int(*i)),
            Data::Float(f) => Some(CellValue::Float(*f)),
            Data::Bool(b) => Some(CellValue::Bool(*b)),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => Some(CellValue::DateTime(naive)),
                // durations and out-of-range serials keep their raw serial number
                None => Some(CellValue::Float(dt.as_f64())),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
            Data::Error(e) => Some(CellValue::Text(e.to_string())),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < WHOLE_FLOAT_LIMIT => {
                write!(f, "{}", *x as i64)
            }
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FMT)),
        }
    }
}
