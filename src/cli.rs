use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::Level;

use crate::config;
use crate::parsers::{DecimalSeparator, PlainTextParser, ReportParser, TabularParser};
use crate::reporting::report;

/// Input format of the JMH result files.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Whitespace-delimited JMH console output
    Plain,
    /// CSV export (Benchmark, Mode, Threads, Samples, Score, Score Error, Unit, Param)
    Tabular,
}

#[derive(Parser, Debug)]
#[command(
    version,
    name = "jmh-report",
    about = "Plot JMH percentile latencies across result files"
)]
pub struct Cli {
    /// Directory containing JMH result files; every regular file becomes one series
    pub dir: PathBuf,

    /// Percentile to plot: the digits after the p0. marker (95 selects the
    /// p0.95 rows, 00 the p0.00 rows, 999 the p0.999 rows)
    #[arg(short, long, default_value = "95", value_parser = parse_percentile)]
    pub percentile: String,

    /// Input format of the result files
    #[arg(short, long, value_enum, default_value_t = InputFormat::Plain)]
    pub format: InputFormat,

    /// Decimal separator used by the result files
    #[arg(long, value_enum, default_value_t = DecimalSeparator::Comma)]
    pub decimal_separator: DecimalSeparator,

    /// Output file; `.html` renders a chart, `.csv` dumps the series, `-` writes CSV to stdout
    #[arg(short, long, default_value = "output.html")]
    pub output: PathBuf,

    /// Use a logarithmic y-axis
    #[arg(long)]
    pub log_scale: bool,

    /// Increase verbosity level (can be specified multiple times.) The first level sets level
    /// "info", second sets level "debug", and third sets level "trace" for the logger.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_percentile(s: &str) -> Result<String, String> {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        Ok(s.to_string())
    } else {
        Err(format!("percentile must be digits, got '{s}'"))
    }
}

pub fn handle_calls() -> Result<()> {
    let cli = Cli::parse();
    let logger_level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(logger_level.as_str())).init();

    let parser: Box<dyn ReportParser> = match cli.format {
        InputFormat::Plain => Box::new(PlainTextParser::new(cli.decimal_separator)),
        InputFormat::Tabular => Box::new(TabularParser::new(cli.decimal_separator)),
    };

    let percentile = format!("{}th", cli.percentile);
    // CLI flag wins over the config default
    let log_scale = cli.log_scale || config::report_log_scale().unwrap_or(false);

    report(&cli.dir, cli.output, &percentile, parser.as_ref(), log_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_assertions() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["jmh-report", "results"]);
        assert_eq!(cli.percentile, "95");
        assert_eq!(cli.format, InputFormat::Plain);
        assert_eq!(cli.decimal_separator, DecimalSeparator::Comma);
        assert_eq!(cli.output, PathBuf::from("output.html"));
        assert!(!cli.log_scale);
    }

    #[test]
    fn test_missing_directory_is_a_usage_error() {
        let result = Cli::try_parse_from(["jmh-report"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_percentile_keeps_leading_zeros() {
        // "00" must stay "00" so the p0.00 rows ("00th") remain selectable
        let cli = Cli::parse_from(["jmh-report", "results", "--percentile", "00"]);
        assert_eq!(cli.percentile, "00");

        let cli = Cli::parse_from(["jmh-report", "results", "--percentile", "999"]);
        assert_eq!(cli.percentile, "999");
    }

    #[test]
    fn test_non_numeric_percentile_is_rejected() {
        let result = Cli::try_parse_from(["jmh-report", "results", "--percentile", "median"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_and_separator_switches() {
        let cli = Cli::parse_from([
            "jmh-report",
            "results",
            "--format",
            "tabular",
            "--decimal-separator",
            "dot",
            "--log-scale",
        ]);
        assert_eq!(cli.format, InputFormat::Tabular);
        assert_eq!(cli.decimal_separator, DecimalSeparator::Dot);
        assert!(cli.log_scale);
    }
}
