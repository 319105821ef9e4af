use crate::error::{LogbookError, Result};
use crate::feature::FeatureRecord;
use serde_json::Value;
use std::path::Path;

/// Read one feature file into normalized records.
///
/// Accepts either a bare JSON array or an envelope object with an array
/// `features` property. A file that does not exist is simply empty.
pub fn read_features(path: &Path) -> Result<Vec<FeatureRecord>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(LogbookError::SourceRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };

    let parsed: Value =
        serde_json::from_slice(&bytes).map_err(|e| LogbookError::SourceParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let items = feature_array(parsed).map_err(|found| LogbookError::SourceSchema {
        path: path.to_path_buf(),
        found,
    })?;

    Ok(items
        .into_iter()
        .map(|item| FeatureRecord::from_value(item).normalized())
        .collect())
}

/// Pull the record array out of a parsed file, or report the top-level type
/// that was found instead.
fn feature_array(parsed: Value) -> std::result::Result<Vec<Value>, &'static str> {
    match parsed {
        Value::Array(items) => Ok(items),
        Value::Object(mut envelope) => match envelope.remove("features") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err("object"),
        },
        other => Err(json_type_name(&other)),
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
