use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::TreeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeOpts {
    /// Separator between label and index segments in a dotted path
    pub delimiter: char,
}

impl Default for TreeOpts {
    fn default() -> Self {
        Self { delimiter: '.' }
    }
}

impl TreeOpts {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }
}

/// Parse a document string. The top level must be an object.
pub fn parse_document(text: &str) -> Result<Value, TreeError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(TreeError::parse("top level must be an object"));
    }
    Ok(value)
}

pub fn to_document_string(value: &Value) -> Result<String, TreeError> {
    Ok(serde_json::to_string(value)?)
}

/// Parse a branch to be inserted: a single-key object.
pub fn parse_branch(text: &str) -> Result<Value, TreeError> {
    let value: Value = serde_json::from_str(text)?;
    match value.as_object() {
        Some(map) if map.len() == 1 => Ok(value),
        Some(map) => Err(TreeError::parse(format!(
            "branch must have exactly one key, found {}",
            map.len()
        ))),
        None => Err(TreeError::parse("branch must be an object")),
    }
}

/// Read a document file and check that it parses.
pub fn load_document(path: &Path) -> Result<String, TreeError> {
    let text = fs::read_to_string(path)?;
    parse_document(&text)?;
    Ok(text)
}

/// Write a document string to disk, pretty-printed.
pub fn write_document(path: &Path, text: &str) -> Result<(), TreeError> {
    let value = parse_document(text)?;
    let s = serde_json::to_string_pretty(&value)?;
    fs::write(path, s)?;
    Ok(())
}
