use std::fs;

use toml::Value;

/// Optional report configuration, read from the working directory.
const CONFIG_FILE: &str = ".jmhreportconfig";

fn read_config() -> Option<Value> {
    let conf_str = fs::read_to_string(CONFIG_FILE).ok()?;
    match conf_str.parse::<Value>() {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("Cannot parse {CONFIG_FILE}: {err}");
            None
        }
    }
}

/// Chart title override: `report.title`.
pub fn report_title() -> Option<String> {
    report_title_from(&read_config()?)
}

/// Default for the logarithmic y-axis: `report.log_scale`. The CLI flag wins.
pub fn report_log_scale() -> Option<bool> {
    report_log_scale_from(&read_config()?)
}

fn report_title_from(config: &Value) -> Option<String> {
    config
        .get("report")?
        .get("title")?
        .as_str()
        .map(str::to_string)
}

fn report_log_scale_from(config: &Value) -> Option<bool> {
    config.get("report")?.get("log_scale")?.as_bool()
}
