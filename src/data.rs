use std::collections::BTreeMap;

/// One parsed benchmark result row.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// The independent variable of the benchmark run (sample size, max prime).
    pub input_parameter: u64,
    /// Percentile this row represents (e.g. "95th"); `None` for the aggregate
    /// summary row.
    pub percentile: Option<String>,
    pub val: f64,
    /// Measurement unit as reported by JMH (e.g. "ms/op"). Carried, not validated.
    pub unit: String,
}

/// Measurements of a single source file, grouped by input parameter.
///
/// Built incrementally while scanning one file, read-only afterwards. Groups
/// iterate in ascending input-parameter order.
#[derive(Debug, Default, PartialEq)]
pub struct MeasurementStore {
    groups: BTreeMap<u64, Vec<Measurement>>,
}

impl MeasurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, measurement: Measurement) {
        self.groups
            .entry(measurement.input_parameter)
            .or_default()
            .push(measurement);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of measurements across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Iterate groups in ascending input-parameter order.
    pub fn groups(&self) -> impl Iterator<Item = (u64, &[Measurement])> {
        self.groups.iter().map(|(param, ms)| (*param, ms.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(param: u64, percentile: Option<&str>, val: f64) -> Measurement {
        Measurement {
            input_parameter: param,
            percentile: percentile.map(str::to_string),
            val,
            unit: "ms/op".to_string(),
        }
    }

    #[test]
    fn test_groups_by_input_parameter() {
        let mut store = MeasurementStore::new();
        store.add(measurement(1000, Some("95th"), 1.217));
        store.add(measurement(1000, Some("99th"), 1.628));
        store.add(measurement(5000, Some("95th"), 2.265));

        assert_eq!(store.len(), 3);
        let groups: Vec<_> = store.groups().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 1000);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, 5000);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn test_groups_iterate_ascending() {
        let mut store = MeasurementStore::new();
        store.add(measurement(10000, Some("95th"), 4.018));
        store.add(measurement(1000, Some("95th"), 1.217));
        store.add(measurement(5000, Some("95th"), 2.265));

        let params: Vec<u64> = store.groups().map(|(p, _)| p).collect();
        assert_eq!(params, vec![1000, 5000, 10000]);
    }

    #[test]
    fn test_empty_store() {
        let store = MeasurementStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.groups().count(), 0);
    }
}
