// Dotted-path accessors over serde_json::Value.
// - Paths alternate object keys and array indices: `a.0.b.1.d`.
// - Reads go through RFC 6901 JSON Pointer (`/a/0/b/1/d`).
// - `set` creates missing containers; an index past the end pads with null.
// - `delete` removes an object key or an array slot and fails on misses.

use serde_json::Value;

use crate::error::TreeError;
use crate::json::TreeOpts;

fn escape_token(tok: &str) -> String {
    let s = tok.replace('~', "~0");
    s.replace('/', "~1")
}

/// Convert a dotted path into a JSON Pointer. The empty path is the whole document.
pub fn to_pointer(path: &str, opts: &TreeOpts) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(path.len() + 1);
    for seg in path.split(opts.delimiter) {
        out.push('/');
        out.push_str(&escape_token(seg));
    }
    out
}

pub fn get<'a>(doc: &'a Value, path: &str, opts: &TreeOpts) -> Option<&'a Value> {
    doc.pointer(&to_pointer(path, opts))
}

/// Length of the array at `path`, zero when absent or not an array.
pub fn len(doc: &Value, path: &str, opts: &TreeOpts) -> usize {
    get(doc, path, opts)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn parse_index(seg: &str) -> Option<usize> {
    if seg.is_empty() || !seg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    seg.parse().ok()
}

fn empty_container(next_seg: &str) -> Value {
    if parse_index(next_seg).is_some() {
        Value::Array(Vec::new())
    } else {
        Value::Object(serde_json::Map::new())
    }
}

fn child_mut<'a>(
    node: &'a mut Value,
    seg: &str,
    next_seg: &str,
    path: &str,
) -> Result<&'a mut Value, TreeError> {
    if node.is_null() {
        *node = empty_container(seg);
    }
    match node {
        Value::Object(map) => Ok(map
            .entry(seg.to_string())
            .or_insert_with(|| empty_container(next_seg))),
        Value::Array(arr) => {
            let idx = parse_index(seg).ok_or_else(|| TreeError::PathNotFound {
                path: path.to_string(),
            })?;
            if idx >= arr.len() {
                arr.resize(idx, Value::Null);
                arr.push(empty_container(next_seg));
            }
            Ok(&mut arr[idx])
        }
        _ => Err(TreeError::PathNotFound {
            path: path.to_string(),
        }),
    }
}

/// Replace or create the value at `path`.
pub fn set(doc: &mut Value, path: &str, value: Value, opts: &TreeOpts) -> Result<(), TreeError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let segs: Vec<&str> = path.split(opts.delimiter).collect();
    let mut cur = doc;
    for pair in segs.windows(2) {
        cur = child_mut(cur, pair[0], pair[1], path)?;
    }
    let last = segs[segs.len() - 1];
    if cur.is_null() {
        *cur = empty_container(last);
    }
    match cur {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = parse_index(last).ok_or_else(|| TreeError::PathNotFound {
                path: path.to_string(),
            })?;
            if idx < arr.len() {
                arr[idx] = value;
            } else {
                arr.resize(idx, Value::Null);
                arr.push(value);
            }
            Ok(())
        }
        _ => Err(TreeError::PathNotFound {
            path: path.to_string(),
        }),
    }
}

/// Remove the object key or array slot at `path`.
pub fn delete(doc: &mut Value, path: &str, opts: &TreeOpts) -> Result<(), TreeError> {
    if path.is_empty() {
        return Err(TreeError::invalid_operation(
            "delete",
            "cannot delete the whole document",
        ));
    }
    let (parent_path, last) = match path.rsplit_once(opts.delimiter) {
        Some((p, l)) => (p, l),
        None => ("", path),
    };
    let not_found = || TreeError::PathNotFound {
        path: path.to_string(),
    };
    let parent = doc
        .pointer_mut(&to_pointer(parent_path, opts))
        .ok_or_else(not_found)?;
    match parent {
        Value::Object(map) => map.shift_remove(last).map(|_| ()).ok_or_else(not_found),
        Value::Array(arr) => {
            let idx = parse_index(last).ok_or_else(not_found)?;
            if idx >= arr.len() {
                return Err(not_found());
            }
            arr.remove(idx);
            Ok(())
        }
        _ => Err(not_found()),
    }
}
