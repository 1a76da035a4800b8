//! Flattening of labelled-array documents into dotted path -> null maps.
//!
//! `{"a":[{"b":[{"c":[]}]}]}` flattens to
//! `{"a":null,"a.0.b":null,"a.0.b.0.c":null}`: one entry per node, keyed by
//! the alternating label/index path from the root, in document pre-order.

use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::json::{TreeOpts, parse_document};

pub type FlatMap = Map<String, Value>;

/// One entry per node.
pub fn flatten(doc: &Value, opts: &TreeOpts) -> Result<FlatMap, TreeError> {
    let mut out = FlatMap::new();
    walk(doc, None, opts.delimiter, false, &mut out)?;
    Ok(out)
}

/// One entry per node without children.
pub fn flatten_leaves(doc: &Value, opts: &TreeOpts) -> Result<FlatMap, TreeError> {
    let mut out = FlatMap::new();
    walk(doc, None, opts.delimiter, true, &mut out)?;
    Ok(out)
}

/// Serialized flat map of a document string.
pub fn flatten_json(text: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    let doc = parse_document(text)?;
    let flat = flatten(&doc, opts)?;
    Ok(serde_json::to_string(&flat)?)
}

fn walk(
    node: &Value,
    prefix: Option<&str>,
    delim: char,
    leaves_only: bool,
    out: &mut FlatMap,
) -> Result<(), TreeError> {
    let obj = node.as_object().ok_or_else(|| {
        TreeError::parse(format!(
            "expected an object at '{}'",
            prefix.unwrap_or_default()
        ))
    })?;
    for (label, children) in obj {
        let path = match prefix {
            Some(p) => format!("{p}{delim}{label}"),
            None => label.clone(),
        };
        let items: &[Value] = match children {
            Value::Array(items) => items.as_slice(),
            Value::Null => &[],
            _ => {
                return Err(TreeError::parse(format!(
                    "children of '{label}' must be an array"
                )));
            }
        };
        if !leaves_only || items.is_empty() {
            out.insert(path.clone(), Value::Null);
        }
        for (i, child) in items.iter().enumerate() {
            let slot = format!("{path}{delim}{i}");
            walk(child, Some(&slot), delim, leaves_only, out)?;
        }
    }
    Ok(())
}
