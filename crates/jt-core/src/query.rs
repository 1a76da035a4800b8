//! Identifier-addressed queries over a serialized document.
//!
//! Every call parses and flattens the whole document, resolves the
//! identifier to its structural path, and answers from there. Nothing is
//! cached between calls. A missing identifier is an `Err`; an empty
//! answer (no parent, no children, no siblings) is `Ok` with an empty value.

use serde_json::Value;
use tracing::trace;

use crate::access;
use crate::error::TreeError;
use crate::flatten::flatten;
use crate::json::{TreeOpts, parse_document};
use crate::path::{array_index_of, distinct_path, identifier_of, parent_path, resolve_path};

pub(crate) struct Located {
    pub doc: Value,
    pub path: String,
}

pub(crate) fn locate(text: &str, id: &str, opts: &TreeOpts) -> Result<Located, TreeError> {
    let doc = parse_document(text)?;
    let flat = flatten(&doc, opts)?;
    let path = resolve_path(&flat, id, opts)?;
    Ok(Located { doc, path })
}

fn children_at<'a>(doc: &'a Value, path: &str, opts: &TreeOpts) -> &'a [Value] {
    access::get(doc, path, opts)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Label of the parent node; empty for the root.
pub fn parent_id(text: &str, id: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    let loc = locate(text, id, opts)?;
    Ok(parent_path(&loc.path, opts)
        .map(|p| identifier_of(p, opts).to_string())
        .unwrap_or_default())
}

/// The node's child array as JSON text, `[]` for a leaf.
pub fn children_json(text: &str, id: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    let loc = locate(text, id, opts)?;
    let children = children_at(&loc.doc, &loc.path, opts);
    Ok(serde_json::to_string(children)?)
}

fn collect_labels(children: &[Value], children_only: bool, out: &mut Vec<String>) {
    for child in children {
        let Some(map) = child.as_object() else {
            continue;
        };
        for (label, grandchildren) in map {
            out.push(label.clone());
            if !children_only && let Some(items) = grandchildren.as_array() {
                collect_labels(items, false, out);
            }
        }
    }
}

/// Labels below `id` in pre-order, or only its direct children.
pub fn descendant_ids(
    text: &str,
    id: &str,
    children_only: bool,
    opts: &TreeOpts,
) -> Result<Vec<String>, TreeError> {
    let loc = locate(text, id, opts)?;
    let mut ids = Vec::new();
    collect_labels(children_at(&loc.doc, &loc.path, opts), children_only, &mut ids);
    Ok(ids)
}

pub fn first_child_id(text: &str, id: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    descendant_ids(text, id, false, opts)?
        .into_iter()
        .next()
        .ok_or_else(|| TreeError::NoChildren { id: id.to_string() })
}

pub fn has_children(text: &str, id: &str, opts: &TreeOpts) -> Result<bool, TreeError> {
    Ok(!descendant_ids(text, id, false, opts)?.is_empty())
}

/// True for the root and for the node in slot 0 of its parent.
pub fn is_first_child(text: &str, id: &str, opts: &TreeOpts) -> Result<bool, TreeError> {
    let loc = locate(text, id, opts)?;
    Ok(array_index_of(&loc.path, opts)?.is_none_or(|k| k == 0))
}

pub fn is_last_child(text: &str, id: &str, opts: &TreeOpts) -> Result<bool, TreeError> {
    Ok(younger_sibling_ids(text, id, opts)?.is_empty())
}

struct SiblingSlot {
    index: usize,
    element_path: String,
}

struct SiblingScan {
    own_index: Option<usize>,
    slots: Vec<SiblingSlot>,
}

// Probes parent.0, parent.1, ... against the document until a slot is
// absent or null. The node's own slot is skipped.
fn scan_siblings(doc: &Value, path: &str, opts: &TreeOpts) -> Result<SiblingScan, TreeError> {
    let own_index = array_index_of(path, opts)?;
    let mut slots = Vec::new();
    let Some(parent) = parent_path(path, opts) else {
        return Ok(SiblingScan { own_index, slots });
    };
    let mut n = 0;
    loop {
        let slot = format!("{parent}{}{n}", opts.delimiter);
        let present = access::get(doc, &slot, opts).is_some_and(|v| !v.is_null());
        trace!(%slot, present, "sibling probe");
        if !present {
            break;
        }
        if own_index != Some(n) {
            slots.push(SiblingSlot {
                index: n,
                element_path: slot,
            });
        }
        n += 1;
    }
    Ok(SiblingScan { own_index, slots })
}

fn labelled<'a>(
    doc: &Value,
    slots: impl Iterator<Item = &'a SiblingSlot>,
    opts: &TreeOpts,
) -> Result<Vec<(usize, String)>, TreeError> {
    slots
        .map(|slot| {
            let path = distinct_path(doc, &slot.element_path, opts)?;
            Ok((slot.index, identifier_of(&path, opts).to_string()))
        })
        .collect()
}

/// Element paths of every sibling slot, in order.
pub fn sibling_element_paths(text: &str, id: &str, opts: &TreeOpts) -> Result<Vec<String>, TreeError> {
    let loc = locate(text, id, opts)?;
    let scan = scan_siblings(&loc.doc, &loc.path, opts)?;
    Ok(scan.slots.into_iter().map(|s| s.element_path).collect())
}

pub fn all_sibling_ids(text: &str, id: &str, opts: &TreeOpts) -> Result<Vec<String>, TreeError> {
    let loc = locate(text, id, opts)?;
    let scan = scan_siblings(&loc.doc, &loc.path, opts)?;
    let ids = labelled(&loc.doc, scan.slots.iter(), opts)?;
    Ok(ids.into_iter().map(|(_, id)| id).collect())
}

/// Siblings after `id`, nearest first.
pub fn younger_sibling_ids(text: &str, id: &str, opts: &TreeOpts) -> Result<Vec<String>, TreeError> {
    let loc = locate(text, id, opts)?;
    let scan = scan_siblings(&loc.doc, &loc.path, opts)?;
    let Some(own) = scan.own_index else {
        return Ok(Vec::new());
    };
    let ids = labelled(&loc.doc, scan.slots.iter().filter(|s| s.index > own), opts)?;
    Ok(ids.into_iter().map(|(_, id)| id).collect())
}

/// The sibling immediately before `id`, empty when `id` is first or the root.
pub fn elder_sibling_id(text: &str, id: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    let loc = locate(text, id, opts)?;
    let scan = scan_siblings(&loc.doc, &loc.path, opts)?;
    let Some(own) = scan.own_index.filter(|k| *k > 0) else {
        return Ok(String::new());
    };
    let siblings = labelled(&loc.doc, scan.slots.iter(), opts)?;
    Ok(siblings
        .into_iter()
        .find(|(index, _)| *index == own - 1)
        .map(|(_, id)| id)
        .unwrap_or_default())
}

pub fn next_younger_sibling_id(text: &str, id: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    Ok(younger_sibling_ids(text, id, opts)?
        .into_iter()
        .next()
        .unwrap_or_default())
}

/// First top-level key of the document; works on any subtree object.
pub fn topmost_ancestor_id(text: &str) -> Result<String, TreeError> {
    let doc = parse_document(text)?;
    Ok(doc
        .as_object()
        .and_then(|map| map.keys().next().cloned())
        .unwrap_or_default())
}
