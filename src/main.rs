use anyhow::Result;
use jmh_report::cli;

// Main entry point
fn main() -> Result<()> {
    cli::handle_calls()
}
