use clap::ValueEnum;
use thiserror::Error;

use crate::data::MeasurementStore;

/// Decimal separator convention of a source file.
///
/// JMH emits comma decimals in locale-sensitive environments. The convention
/// is configured per scan, never auto-detected; mixing separators within one
/// source is unsupported.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecimalSeparator {
    Comma,
    Dot,
}

impl DecimalSeparator {
    /// Normalize a raw numeric field to dot-decimal notation.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            DecimalSeparator::Comma => raw.replace(',', "."),
            DecimalSeparator::Dot => raw.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// Not a data row (header, blank, or separator); skipped without logging.
    #[error("not a data row")]
    NotData,

    #[error("malformed value '{field}'")]
    MalformedValue { field: String },

    #[error("malformed input parameter '{field}'")]
    MalformedParameter { field: String },
}

/// A format adapter that scans one source file into a measurement store.
pub trait ReportParser {
    /// Parse every record of `input` and collect the results, keyed by input
    /// parameter. Non-data rows are skipped silently, malformed rows with a
    /// warning; one bad record never aborts the scan.
    fn scan(&self, input: &str) -> MeasurementStore;
}

/// Minimal number of fields within a valuable data row.
pub(crate) const MIN_FIELDS: usize = 5;

/// Derive the percentile label from a benchmark label token.
///
/// JMH percentile rows carry a `p0.NN` marker in the benchmark label; the
/// digits after the marker become the label ("p0.95" -> "95th"). Rows without
/// the marker (the aggregate summary row, and the p1.00 row) yield `None`.
pub(crate) fn percentile_label(label: &str) -> Option<String> {
    let (_, suffix) = label.split_once("p0.")?;
    let digits: String = suffix.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("{digits}th"))
}

pub(crate) fn parse_value(raw: &str, separator: DecimalSeparator) -> Result<f64, RecordError> {
    separator
        .normalize(raw)
        .parse::<f64>()
        .map_err(|_| RecordError::MalformedValue {
            field: raw.to_string(),
        })
}

pub(crate) fn parse_parameter(raw: &str) -> Result<u64, RecordError> {
    raw.parse::<u64>().map_err(|_| RecordError::MalformedParameter {
        field: raw.to_string(),
    })
}
