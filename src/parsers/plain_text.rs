use log::warn;

use super::types::{
    parse_parameter, parse_value, percentile_label, DecimalSeparator, RecordError, ReportParser,
    MIN_FIELDS,
};
use crate::data::{Measurement, MeasurementStore};

/// Parser for whitespace-delimited JMH console output.
///
/// Fields of interest per line: token 0 is the benchmark label (carrying the
/// percentile marker), token 1 the input parameter, token 3 the score and
/// token 4 its unit. Everything else (warmup banners, headers, blank lines)
/// falls short of the minimal field count and is skipped as non-data.
pub struct PlainTextParser {
    decimal: DecimalSeparator,
}

impl PlainTextParser {
    pub fn new(decimal: DecimalSeparator) -> Self {
        Self { decimal }
    }

    fn parse_line(&self, line: &str) -> Result<Measurement, RecordError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < MIN_FIELDS {
            return Err(RecordError::NotData);
        }

        Ok(Measurement {
            input_parameter: parse_parameter(tokens[1])?,
            percentile: percentile_label(tokens[0]),
            val: parse_value(tokens[3], self.decimal)?,
            unit: tokens[4].to_string(),
        })
    }
}

impl ReportParser for PlainTextParser {
    fn scan(&self, input: &str) -> MeasurementStore {
        let mut store = MeasurementStore::new();
        for line in input.lines() {
            match self.parse_line(line) {
                Ok(measurement) => store.add(measurement),
                Err(RecordError::NotData) => {}
                Err(err) => warn!("Skipping line '{}': {}", line.trim(), err),
            }
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JMH_OUTPUT: &str = "\
Benchmark                                  (maxPrime)    Mode     Cnt  Score   Error  Units
CalculatorBenchmark.run                          1000  sample   57295  0,872   0,006  ms/op
CalculatorBenchmark.run:run\u{b7}p0.00              1000  sample           0,514          ms/op
CalculatorBenchmark.run:run\u{b7}p0.95              1000  sample           1,217          ms/op
CalculatorBenchmark.run:run\u{b7}p0.99              1000  sample           1,628          ms/op
CalculatorBenchmark.run:run\u{b7}p0.95              5000  sample           2,265          ms/op

# Run complete. Total time: 00:06:12
";

    fn parser() -> PlainTextParser {
        PlainTextParser::new(DecimalSeparator::Comma)
    }

    #[test]
    fn test_scan_collects_percentile_rows() {
        let store = parser().scan(JMH_OUTPUT);
        // Header and banner lines have non-numeric parameter fields, the blank
        // line is non-data; the aggregate row and four percentile rows remain.
        assert_eq!(store.len(), 5);

        let groups: Vec<_> = store.groups().collect();
        assert_eq!(groups[0].0, 1000);
        assert_eq!(groups[0].1.len(), 4);
        assert_eq!(groups[1].0, 5000);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn test_percentile_row_fields() {
        let m = parser()
            .parse_line(
                "CalculatorBenchmark.run:run\u{b7}p0.95    1000  sample    1,217    ms/op",
            )
            .unwrap();
        assert_eq!(m.input_parameter, 1000);
        assert_eq!(m.percentile.as_deref(), Some("95th"));
        assert_eq!(m.val, 1.217);
        assert_eq!(m.unit, "ms/op");
    }

    #[test]
    fn test_aggregate_row_has_no_percentile() {
        let m = parser()
            .parse_line("CalculatorBenchmark.run    1000  sample  57295  0,872  ms/op")
            .unwrap();
        assert_eq!(m.percentile, None);
    }

    #[test]
    fn test_too_few_fields_is_not_data() {
        assert_eq!(
            parser().parse_line("# Warmup: 5 iterations"),
            Err(RecordError::NotData)
        );
        assert_eq!(parser().parse_line(""), Err(RecordError::NotData));
    }

    #[test]
    fn test_malformed_parameter_is_distinguishable() {
        let result =
            parser().parse_line("Benchmark   (maxPrime)   Mode   Cnt   Score   Error   Units");
        assert!(matches!(result, Err(RecordError::MalformedParameter { .. })));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let first = parser().scan(JMH_OUTPUT);
        let second = parser().scan(JMH_OUTPUT);
        assert_eq!(first, second);
    }

    #[test]
    fn test_dot_decimal_mode() {
        let parser = PlainTextParser::new(DecimalSeparator::Dot);
        let m = parser
            .parse_line("Bench.run:run\u{b7}p0.95    1000  sample    1.217    ms/op")
            .unwrap();
        assert_eq!(m.val, 1.217);
    }
}
