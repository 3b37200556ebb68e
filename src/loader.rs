//! Loading parameter tables from YAML or JSON.
//!
//! A table is a sequence of mappings, one per record:
//!
//! ```yaml
//! - testname: small
//!   a: 1
//! - testname: large
//!   a: 1000
//!   skip: true
//! ```
//!
//! Loading only checks shape. Identifiers are checked by [`crate::params`].

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::record::ParameterRecord;
use crate::{err_msg, ParamsError};

pub fn records_from_yaml(text: &str) -> Result<Vec<ParameterRecord>, ParamsError> {
    let value: Value =
        serde_yaml::from_str(text).map_err(|e| ParamsError::load("yaml table", e))?;
    into_records(value)
}

pub fn records_from_json(text: &str) -> Result<Vec<ParameterRecord>, ParamsError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ParamsError::load("json table", e))?;
    into_records(value)
}

/// Loads a table from a `.yaml`, `.yml` or `.json` file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<ParameterRecord>, ParamsError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| ParamsError::load(&origin, e))?;
    let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&text).map_err(|e| ParamsError::load(&origin, e))?
        }
        Some("json") => serde_json::from_str(&text).map_err(|e| ParamsError::load(&origin, e))?,
        _ => {
            return Err(ParamsError::Load {
                origin,
                message: "expected a .yaml, .yml or .json file".to_string(),
                source: None,
            })
        }
    };
    into_records(value)
}

fn into_records(value: Value) -> Result<Vec<ParameterRecord>, ParamsError> {
    let Value::Array(items) = value else {
        return Err(err_msg!(
            MalformedDeclaration,
            "a parameter table must be a sequence of mappings"
        ));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(ParameterRecord::from_map(fields)),
            other => Err(err_msg!(
                MalformedDeclaration,
                format!("test param #{} must be a mapping, got {}", index, other)
            )),
        })
        .collect()
}
