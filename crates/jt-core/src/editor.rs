use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::access;
use crate::error::{EditError, TreeError};
use crate::json::{TreeOpts, parse_branch, to_document_string};
use crate::path::{array_index_of, distinct_path, element_path, identifier_of, parent_path};
use crate::query::locate;

/// Where a branch goes relative to an existing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

impl FromStr for Placement {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(Placement::Before),
            "after" => Ok(Placement::After),
            _ => Err(TreeError::InvalidDirective {
                directive: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Placement::Before => "before",
            Placement::After => "after",
        })
    }
}

/// Which end of a node's children a branch goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsideEdge {
    Beginning,
    End,
}

impl FromStr for InsideEdge {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insideBeginning" => Ok(InsideEdge::Beginning),
            "insideEnd" => Ok(InsideEdge::End),
            _ => Err(TreeError::InvalidDirective {
                directive: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for InsideEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InsideEdge::Beginning => "insideBeginning",
            InsideEdge::End => "insideEnd",
        })
    }
}

/// Any of the four insertion directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Adjacent(Placement),
    Inside(InsideEdge),
}

impl FromStr for Insertion {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Placement>()
            .map(Insertion::Adjacent)
            .or_else(|_| s.parse::<InsideEdge>().map(Insertion::Inside))
    }
}

// Rebuilds the array holding the node at `path` with `branch` next to it.
fn place_adjacent(
    doc: &mut Value,
    path: &str,
    branch: Value,
    placement: Placement,
    opts: &TreeOpts,
) -> Result<(), EditError> {
    const OP: &str = "insert_adjacent";
    let root_err =
        || TreeError::invalid_operation(OP, "cannot insert next to the topmost ancestor");
    let k = array_index_of(path, opts)
        .map_err(EditError::at(OP, "array index"))?
        .ok_or_else(root_err)
        .map_err(EditError::at(OP, "array index"))?;
    let parent = parent_path(path, opts)
        .ok_or_else(root_err)
        .map_err(EditError::at(OP, "parent path"))?;

    let siblings = access::get(doc, parent, opts)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let mut branch = Some(branch);
    let mut rebuilt = Vec::with_capacity(siblings.len() + 1);
    for (i, sibling) in siblings.into_iter().enumerate() {
        if i == k && placement == Placement::Before {
            rebuilt.extend(branch.take());
        }
        rebuilt.push(sibling);
        if i == k && placement == Placement::After {
            rebuilt.extend(branch.take());
        }
    }
    access::set(doc, parent, Value::Array(rebuilt), opts)
        .map_err(EditError::at(OP, "set parent array"))
}

/// Insert `branch` as a sibling immediately before or after `id`.
pub fn insert_adjacent(
    text: &str,
    id: &str,
    branch: &str,
    placement: Placement,
    opts: &TreeOpts,
) -> Result<String, EditError> {
    const OP: &str = "insert_adjacent";
    let branch = parse_branch(branch).map_err(EditError::at(OP, "parse branch"))?;
    let mut loc = locate(text, id, opts).map_err(EditError::at(OP, "resolve path"))?;
    place_adjacent(&mut loc.doc, &loc.path, branch, placement, opts)?;
    debug!(id, %placement, "inserted branch");
    to_document_string(&loc.doc).map_err(EditError::at(OP, "serialize"))
}

/// Insert `branch` as the first or last child of `id`.
///
/// A node with children gets the branch placed before its first child or
/// after its last; a childless node gets `[branch]`.
pub fn insert_into(
    text: &str,
    id: &str,
    branch: &str,
    edge: InsideEdge,
    opts: &TreeOpts,
) -> Result<String, EditError> {
    const OP: &str = "insert_into";
    let branch = parse_branch(branch).map_err(EditError::at(OP, "parse branch"))?;
    let mut loc = locate(text, id, opts).map_err(EditError::at(OP, "resolve path"))?;
    let count = access::len(&loc.doc, &loc.path, opts);

    if count == 0 {
        let slot = format!("{}{}0", loc.path, opts.delimiter);
        access::set(&mut loc.doc, &slot, branch, opts)
            .map_err(EditError::at(OP, "insert into empty node"))?;
    } else {
        let (index, placement, step) = match edge {
            InsideEdge::Beginning => (0, Placement::Before, "locate first child"),
            InsideEdge::End => (count - 1, Placement::After, "locate last child"),
        };
        let slot = format!("{}{}{index}", loc.path, opts.delimiter);
        let child_path = distinct_path(&loc.doc, &slot, opts).map_err(EditError::at(OP, step))?;
        debug!(id, child = identifier_of(&child_path, opts), %placement, "inserting next to child");
        place_adjacent(&mut loc.doc, &child_path, branch, placement, opts)?;
    }
    debug!(id, %edge, "inserted branch");
    to_document_string(&loc.doc).map_err(EditError::at(OP, "serialize"))
}

/// Dispatch on any insertion directive.
pub fn insert(
    text: &str,
    id: &str,
    branch: &str,
    insertion: Insertion,
    opts: &TreeOpts,
) -> Result<String, EditError> {
    match insertion {
        Insertion::Adjacent(p) => insert_adjacent(text, id, branch, p, opts),
        Insertion::Inside(e) => insert_into(text, id, branch, e, opts),
    }
}

/// Delete the node `id` together with its subtree.
pub fn remove_by_id(text: &str, id: &str, opts: &TreeOpts) -> Result<String, EditError> {
    const OP: &str = "remove_by_id";
    let mut loc = locate(text, id, opts).map_err(EditError::at(OP, "resolve path"))?;
    let slot = element_path(&loc.path, opts)
        .ok_or_else(|| TreeError::invalid_operation("remove", "id cannot be the topmost ancestor"))
        .map_err(EditError::at(OP, "element path"))?
        .to_string();
    access::delete(&mut loc.doc, &slot, opts).map_err(EditError::at(OP, "delete slot"))?;
    debug!(id, %slot, "removed node");
    to_document_string(&loc.doc).map_err(EditError::at(OP, "serialize"))
}
