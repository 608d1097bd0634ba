//! Refinement task configuration.
//!
//! Read from a task document (see [`crate::Utils::task_parser`]):
//! ```text
//! refinement
//!   method: multiple_class
//!   classes: 2
//!   top_percent: 0.3
//!   refinements_num: 10
//!   threshold: 0.0
//! logging
//!   loglevel: info
//!   log_to_file: false
//! ```
//! Every key is optional, missing ones keep their [`Default`] value.
use crate::Utils::task_parser::{DocumentMap, Value, parse_document_with_template, unknown_keys};
use crate::refinement::policy::RefinementMethod;
use crate::sparse_grid::SparseGridError;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct RefinementConfig {
    pub method: RefinementMethod,
    pub classes: usize,
    /// relative density band around the dominant class, in [0, 1]
    pub top_percent: f64,
    pub refinements_num: usize,
    pub threshold: f64,
    pub loglevel: Option<String>,
    pub log_to_file: bool,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        RefinementConfig {
            method: RefinementMethod::Hash,
            classes: 1,
            top_percent: 0.0,
            refinements_num: 1,
            threshold: 0.0,
            loglevel: None,
            log_to_file: false,
        }
    }
}

fn template() -> DocumentMap {
    let section = |keys: &[&str]| -> HashMap<String, Option<Vec<Value>>> {
        keys.iter().map(|k| (k.to_string(), None)).collect()
    };
    HashMap::from([
        (
            "refinement".to_string(),
            section(&["method", "classes", "top_percent", "refinements_num", "threshold"]),
        ),
        ("logging".to_string(), section(&["loglevel", "log_to_file"])),
    ])
}

fn first_value<'a>(document: &'a DocumentMap, title: &str, key: &str) -> Option<&'a Value> {
    document
        .get(title)
        .and_then(|section| section.get(key))
        .and_then(|values| values.as_ref())
        .and_then(|values| values.first())
}

fn invalid(key: &str, value: &Value) -> SparseGridError {
    SparseGridError::InvalidConfig(format!("bad value '{}' for {}", value, key))
}

fn as_count(key: &str, value: &Value) -> Result<usize, SparseGridError> {
    value
        .as_integer()
        .filter(|&n| n >= 0)
        .map(|n| n as usize)
        .ok_or_else(|| invalid(key, value))
}

impl RefinementConfig {
    pub fn from_task(task: &str) -> Result<Self, SparseGridError> {
        let template = template();
        let document =
            parse_document_with_template(task, &template).map_err(SparseGridError::InvalidConfig)?;
        let unknown = unknown_keys(&document, &template);
        if !unknown.is_empty() {
            return Err(SparseGridError::InvalidConfig(format!(
                "unknown keys: {}",
                unknown.join(", ")
            )));
        }

        let mut config = RefinementConfig::default();
        if let Some(value) = first_value(&document, "refinement", "method") {
            let name = value.as_string().ok_or_else(|| invalid("method", value))?;
            config.method =
                RefinementMethod::from_str(name).map_err(|_| invalid("method", value))?;
        }
        if let Some(value) = first_value(&document, "refinement", "classes") {
            config.classes = as_count("classes", value)?;
        }
        if let Some(value) = first_value(&document, "refinement", "top_percent") {
            config.top_percent = value.as_float().ok_or_else(|| invalid("top_percent", value))?;
        }
        if let Some(value) = first_value(&document, "refinement", "refinements_num") {
            config.refinements_num = as_count("refinements_num", value)?;
        }
        if let Some(value) = first_value(&document, "refinement", "threshold") {
            config.threshold = value.as_float().ok_or_else(|| invalid("threshold", value))?;
        }
        if let Some(value) = first_value(&document, "logging", "loglevel") {
            config.loglevel = Some(value.to_string());
        }
        if let Some(value) = first_value(&document, "logging", "log_to_file") {
            config.log_to_file = value.as_boolean().ok_or_else(|| invalid("log_to_file", value))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SparseGridError> {
        let task = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SparseGridError::InvalidConfig(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_task(&task)
    }

    pub fn validate(&self) -> Result<(), SparseGridError> {
        if !(0.0..=1.0).contains(&self.top_percent) {
            return Err(SparseGridError::InvalidConfig(format!(
                "top_percent must lie in [0, 1], got {}",
                self.top_percent
            )));
        }
        if self.classes == 0 {
            return Err(SparseGridError::InvalidConfig(
                "at least one class is needed".to_string(),
            ));
        }
        Ok(())
    }
}
