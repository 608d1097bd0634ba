use crate::sparse_grid::SparseGridError;
use chrono::Local;
use log::info;
use simplelog::*;
use std::collections::HashMap;
use std::fs::File;
use std::time::Duration;
use tabled::{builder::Builder, settings::Style};

/// level filter for "debug", "info", "warn", "error"; None means info
pub fn level_filter(loglevel: Option<&str>) -> Result<LevelFilter, SparseGridError> {
    match loglevel {
        None | Some("info") => Ok(LevelFilter::Info),
        Some("debug") => Ok(LevelFilter::Debug),
        Some("warn") => Ok(LevelFilter::Warn),
        Some("error") => Ok(LevelFilter::Error),
        Some("off") => Ok(LevelFilter::Off),
        Some(other) => Err(SparseGridError::InvalidConfig(format!(
            "loglevel must be debug, info, warn, error or off, got {}",
            other
        ))),
    }
}

/// installs terminal logging and, if asked, a log_<date>.txt file next to it.
/// A logger installed earlier stays in place, that is not an error.
pub fn init_logger(loglevel: Option<&str>, to_file: bool) -> Result<(), SparseGridError> {
    let level = level_filter(loglevel)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        let file = File::create(&name).map_err(|e| SparseGridError::Logger(e.to_string()))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    if CombinedLogger::init(loggers).is_err() {
        info!("logger already initialized");
    }
    Ok(())
}

/// duration in the most readable unit: (unit, value)
pub fn elapsed_time(elapsed: Duration) -> (String, f64) {
    let time = elapsed.as_millis();
    if time < 1000 {
        (" ms".to_string(), time as f64)
    } else if time < 60_000 {
        (" s".to_string(), elapsed.as_secs_f64())
    } else if time < 3_600_000 {
        (" min".to_string(), elapsed.as_secs_f64() / 60.0)
    } else {
        (" h".to_string(), elapsed.as_secs_f64() / 3600.0)
    }
}

/// renders key/value statistics as a rounded table (keys sorted) and logs it
pub fn statistics_table(title: &str, statistics: &HashMap<String, String>) -> String {
    let mut rows: Vec<(&String, &String)> = statistics.iter().collect();
    rows.sort();
    let mut builder = Builder::default();
    for (key, value) in rows {
        builder.push_record([key.as_str(), value.as_str()]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    let table = table.to_string();
    info!("\n \n {} \n \n {}", title, table);
    table
}
