use thiserror::Error;

use crate::data::MeasurementStore;

/// One value per input parameter for a single percentile, ascending by
/// parameter. `params` and `values` are parallel vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentileSeries {
    pub params: Vec<u64>,
    pub values: Vec<f64>,
    /// Unit of the first selected measurement; used for axis labeling.
    pub unit: Option<String>,
}

impl PercentileSeries {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    /// JMH emits unique percentile rows per parameter; a duplicate indicates
    /// corrupted or unsupported input.
    #[error("duplicate measurement for input parameter {input_parameter}, percentile {percentile}")]
    DuplicateMeasurement {
        input_parameter: u64,
        percentile: String,
    },
}

/// Select the measurement matching `percentile` for every input parameter.
///
/// Parameters without a matching percentile are skipped rather than treated
/// as an error, so heterogeneous result files can still be compared. More
/// than one match for the same parameter fails the whole selection.
pub fn select_percentile(
    store: &MeasurementStore,
    percentile: &str,
) -> Result<PercentileSeries, SelectionError> {
    let mut series = PercentileSeries::default();

    for (param, measurements) in store.groups() {
        let mut matches = measurements
            .iter()
            .filter(|m| m.percentile.as_deref() == Some(percentile));

        let Some(first) = matches.next() else {
            continue;
        };
        if matches.next().is_some() {
            return Err(SelectionError::DuplicateMeasurement {
                input_parameter: param,
                percentile: percentile.to_string(),
            });
        }

        series.params.push(param);
        series.values.push(first.val);
        if series.unit.is_none() {
            series.unit = Some(first.unit.clone());
        }
    }

    Ok(series)
}
