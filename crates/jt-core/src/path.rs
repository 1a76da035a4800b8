//! Path resolution and path algebra.
//!
//! A structural path alternates labels and array indices, starting and
//! ending on a label: `a.0.b.1.d`. The root path is a single label. The
//! element path of a node drops its final label (`a.0.b.1`), addressing the
//! array slot that holds it; the root has none, and every helper here
//! reports that as `None` rather than as slot zero.

use serde_json::Value;
use tracing::debug;

use crate::access;
use crate::error::TreeError;
use crate::flatten::FlatMap;
use crate::json::TreeOpts;

/// Find the path of the node labelled `id`.
///
/// Scans flat-map keys in document order for one whose label segments
/// contain `id`, and returns that key cut after the first matching label.
pub fn resolve_path(flat: &FlatMap, id: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    let delim = opts.delimiter;
    for key in flat.keys() {
        if !key.contains(id) {
            continue;
        }
        let mut end = 0;
        for (i, seg) in key.split(delim).enumerate() {
            end += seg.len();
            if i % 2 == 0 && seg == id {
                let path = key[..end].to_string();
                debug!(id, %path, "resolved id");
                return Ok(path);
            }
            end += delim.len_utf8();
        }
    }
    Err(TreeError::not_found(id))
}

fn segment_count(path: &str, opts: &TreeOpts) -> usize {
    if path.is_empty() {
        return 0;
    }
    path.split(opts.delimiter).count()
}

/// Last segment of a path; `"a"` is its own identifier.
pub fn identifier_of<'a>(path: &'a str, opts: &TreeOpts) -> &'a str {
    match path.rsplit_once(opts.delimiter) {
        Some((_, id)) => id,
        None => path,
    }
}

/// Path to the array slot holding the node, `None` for the root.
pub fn element_path<'a>(path: &'a str, opts: &TreeOpts) -> Option<&'a str> {
    if segment_count(path, opts) < 3 {
        return None;
    }
    path.rsplit_once(opts.delimiter).map(|(head, _)| head)
}

/// Path to the parent node, `None` for the root.
pub fn parent_path<'a>(path: &'a str, opts: &TreeOpts) -> Option<&'a str> {
    let elem = element_path(path, opts)?;
    elem.rsplit_once(opts.delimiter).map(|(head, _)| head)
}

/// Position of the node within its parent's children, `None` for the root.
pub fn array_index_of(path: &str, opts: &TreeOpts) -> Result<Option<usize>, TreeError> {
    let Some(elem) = element_path(path, opts) else {
        return Ok(None);
    };
    let seg = identifier_of(elem, opts);
    seg.parse::<usize>()
        .map(Some)
        .map_err(|_| TreeError::parse(format!("'{seg}' in '{path}' is not an array index")))
}

/// Extend an element path with the label of the node stored in that slot.
pub fn distinct_path(doc: &Value, element_path: &str, opts: &TreeOpts) -> Result<String, TreeError> {
    let slot = access::get(doc, element_path, opts).ok_or_else(|| TreeError::PathNotFound {
        path: element_path.to_string(),
    })?;
    let label = slot
        .as_object()
        .and_then(|map| map.keys().next())
        .ok_or_else(|| TreeError::parse(format!("slot '{element_path}' holds no labelled node")))?;
    Ok(format!("{element_path}{}{label}", opts.delimiter))
}
