use std::{
    fs::{self, File},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use itertools::Itertools;
use log::{info, warn};
use plotly::{
    common::{Mode, Title},
    layout::{Axis, AxisType},
    Configuration, Layout, Plot, Scatter,
};

use crate::{
    config,
    parsers::ReportParser,
    selection::{select_percentile, PercentileSeries},
};

/// Default chart title when neither CLI nor config provide one.
const DEFAULT_REPORT_TITLE: &str = "JMH Percentile Latencies";

/// Default HTML shell the plot is embedded into. Placeholders are substituted
/// at render time; Plotly.js itself is loaded from the CDN via the head part.
const DEFAULT_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{TITLE}}</title>
    {{PLOTLY_HEAD}}
</head>
<body>
    {{PLOTLY_BODY}}
    <p style="font-family: monospace; color: gray">Generated {{TIMESTAMP}}</p>
</body>
</html>"#;

/// Extract Plotly JavaScript dependencies and plot content.
///
/// `plotly_head` holds the script tags loading Plotly.js from the CDN,
/// `plotly_body` the inline div + script of the actual plot, which assumes
/// Plotly.js is already available on the page.
fn extract_plotly_parts(plot: &Plot) -> (String, String) {
    let plotly_head = Plot::online_cdn_js();
    let plotly_body = plot.to_inline_html(None);
    (plotly_head, plotly_body)
}

trait Reporter {
    fn add_series(&mut self, name: &str, series: &PercentileSeries);
    fn as_bytes(&self) -> Vec<u8>;
}

struct PlotlyReporter {
    plot: Plot,
    title: String,
    log_scale: bool,
    // Units of all added series; the y-axis only gets a unit label when they
    // all agree.
    series_units: Vec<Option<String>>,
}

impl PlotlyReporter {
    fn new(log_scale: bool) -> PlotlyReporter {
        let config = Configuration::default().responsive(true).fill_frame(false);
        let mut plot = Plot::new();
        plot.set_configuration(config);

        let title = config::report_title().unwrap_or_else(|| DEFAULT_REPORT_TITLE.to_string());

        PlotlyReporter {
            plot,
            title,
            log_scale,
            series_units: Vec::new(),
        }
    }

    /// Y-axis with unit label and/or log scale, or `None` when the defaults apply.
    fn compute_y_axis(&self) -> Option<Axis> {
        let shared_unit = if self.series_units.iter().all_equal() {
            self.series_units.first().cloned().flatten()
        } else {
            None
        };

        if shared_unit.is_none() && !self.log_scale {
            return None;
        }

        let mut axis = Axis::new();
        if let Some(unit) = shared_unit {
            axis = axis.title(Title::from(format!("Value ({unit})").as_str()));
        }
        if self.log_scale {
            axis = axis.type_(AxisType::Log);
        }
        Some(axis)
    }
}

impl Reporter for PlotlyReporter {
    fn add_series(&mut self, name: &str, series: &PercentileSeries) {
        self.series_units.push(series.unit.clone());

        let trace = Scatter::new(series.params.clone(), series.values.clone())
            .mode(Mode::LinesMarkers)
            .name(name);
        self.plot.add_trace(trace);
    }

    fn as_bytes(&self) -> Vec<u8> {
        let mut plot = self.plot.clone();
        let mut layout = Layout::new()
            .title(Title::from(self.title.as_str()))
            .x_axis(Axis::new().title(Title::from("Input parameter")));
        if let Some(y_axis) = self.compute_y_axis() {
            layout = layout.y_axis(y_axis);
        }
        plot.set_layout(layout);

        let (plotly_head, plotly_body) = extract_plotly_parts(&plot);
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        let output = DEFAULT_HTML_TEMPLATE
            .replace("{{TITLE}}", &self.title)
            .replace("{{PLOTLY_HEAD}}", &plotly_head)
            .replace("{{PLOTLY_BODY}}", &plotly_body)
            .replace("{{TIMESTAMP}}", &timestamp);

        output.into_bytes()
    }
}

struct CsvReporter {
    rows: Vec<(String, u64, f64, String)>,
}

impl CsvReporter {
    fn new() -> Self {
        CsvReporter { rows: Vec::new() }
    }
}

impl Reporter for CsvReporter {
    fn add_series(&mut self, name: &str, series: &PercentileSeries) {
        let unit = series.unit.clone().unwrap_or_default();
        for (param, value) in series.params.iter().zip(series.values.iter()) {
            self.rows
                .push((name.to_string(), *param, *value, unit.clone()));
        }
    }

    fn as_bytes(&self) -> Vec<u8> {
        let mut lines = vec!["source\tparam\tvalue\tunit".to_string()];

        for (source, param, value, unit) in &self.rows {
            // Whole floats always get one decimal place
            let value_str = if value.fract() == 0.0 && value.is_finite() {
                format!("{:.1}", value)
            } else {
                value.to_string()
            };
            lines.push(format!("{source}\t{param}\t{value_str}\t{unit}"));
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output.into_bytes()
    }
}

struct ReporterFactory {}

impl ReporterFactory {
    fn from_file_name(path: &Path, log_scale: bool) -> Option<Box<dyn Reporter>> {
        if path == Path::new("-") {
            return Some(Box::new(CsvReporter::new()) as Box<dyn Reporter>);
        }
        let mut res = None;
        if let Some(ext) = path.extension() {
            let extension = ext.to_ascii_lowercase().into_string().unwrap();
            res = match extension.as_str() {
                "html" => Some(Box::new(PlotlyReporter::new(log_scale)) as Box<dyn Reporter>),
                "csv" => Some(Box::new(CsvReporter::new()) as Box<dyn Reporter>),
                _ => None,
            }
        }
        res
    }
}

/// Trace name for a source file: its stem, falling back to the full path.
fn series_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Build the report: scan every regular file of `source_dir`, select the
/// requested percentile per file and emit one series each.
///
/// Files are processed in directory-listing order; each file yields an
/// independent store. An unreadable file is skipped with a warning, a file
/// with duplicate percentile rows aborts the run naming the file.
pub fn report(
    source_dir: &Path,
    output: PathBuf,
    percentile: &str,
    parser: &dyn ReportParser,
    log_scale: bool,
) -> Result<()> {
    let mut reporter = ReporterFactory::from_file_name(&output, log_scale)
        .ok_or(anyhow!("Could not infer output format"))?;

    let entries = fs::read_dir(source_dir)
        .with_context(|| format!("Cannot list source directory {}", source_dir.display()))?;

    let mut series_count = 0;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        // Scoped read: the handle is released on every exit path
        let input = match fs::read_to_string(&path) {
            Ok(input) => input,
            Err(err) => {
                warn!("Skipping unreadable file {}: {}", path.display(), err);
                continue;
            }
        };

        let store = parser.scan(&input);
        let series = select_percentile(&store, percentile)
            .with_context(|| format!("Inconsistent measurements in {}", path.display()))?;

        if series.is_empty() {
            info!(
                "No {} measurements in {}, skipping",
                percentile,
                path.display()
            );
            continue;
        }

        reporter.add_series(&series_name(&path), &series);
        series_count += 1;
    }

    if series_count == 0 {
        bail!(
            "No measurements with percentile {} found in {}",
            percentile,
            source_dir.display()
        );
    }

    let output_bytes = reporter.as_bytes();

    if output == Path::new("-") {
        match io::stdout().write_all(&output_bytes) {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            res => res,
        }?;
    } else {
        File::create(&output)?.write_all(&output_bytes)?;
    }

    Ok(())
}
