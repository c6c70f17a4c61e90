//! Parsers for JMH result formats
//!
//! This module provides format adapters for the two JMH output flavors,
//! converting raw result files into a common `MeasurementStore`.

pub mod plain_text;
pub mod tabular;
pub mod types;

// Re-export commonly used types
pub use plain_text::PlainTextParser;
pub use tabular::TabularParser;
pub use types::{DecimalSeparator, RecordError, ReportParser};
