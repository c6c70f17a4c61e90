use csv::{ReaderBuilder, StringRecord, Trim};
use itertools::Itertools;
use log::warn;

use super::types::{
    parse_parameter, parse_value, percentile_label, DecimalSeparator, RecordError, ReportParser,
};
use crate::data::{Measurement, MeasurementStore};

/// Number of columns of a complete JMH CSV row.
const MIN_COLUMNS: usize = 8;

/// Parser for JMH CSV result exports.
///
/// Columns: Benchmark, Mode, Threads, Samples, Score, Score Error, Unit,
/// Param: <name>. Fields of interest: column 0 (label), column 7 (input
/// parameter), column 4 (score) and column 6 (unit). The header row is
/// consumed by the CSV reader; short rows are skipped as non-data.
pub struct TabularParser {
    decimal: DecimalSeparator,
}

impl TabularParser {
    pub fn new(decimal: DecimalSeparator) -> Self {
        Self { decimal }
    }

    fn parse_record(&self, record: &StringRecord) -> Result<Measurement, RecordError> {
        if record.len() < MIN_COLUMNS {
            return Err(RecordError::NotData);
        }

        Ok(Measurement {
            input_parameter: parse_parameter(&record[7])?,
            percentile: percentile_label(&record[0]),
            val: parse_value(&record[4], self.decimal)?,
            unit: record[6].to_string(),
        })
    }
}

impl ReportParser for TabularParser {
    fn scan(&self, input: &str) -> MeasurementStore {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input.as_bytes());

        let mut store = MeasurementStore::new();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!("Skipping unreadable row: {err}");
                    continue;
                }
            };
            match self.parse_record(&record) {
                Ok(measurement) => store.add(measurement),
                Err(RecordError::NotData) => {}
                Err(err) => warn!("Skipping row '{}': {}", record.iter().join(","), err),
            }
        }
        store
    }
}
