//! jt-core: query and edit labelled-array JSON trees by node identifier
//!
//! A document is an object with one key (the node label) mapped to an array
//! of child documents, e.g. `{"a":[{"b":[]},{"c":[]}]}`. Labels are unique and
//! serve as node identifiers.
//! - Flattening into dotted path -> null maps (`a.0.b`)
//! - Path resolution and algebra (parent, element slot, array index)
//! - Queries: parent, descendants, siblings, first/last child, topmost ancestor
//! - Edits: insert next to / inside a node, remove by id
//!
//! Documents go in and come out as strings; chain edits by feeding each
//! result into the next call. The delimiter lives in `TreeOpts`.
pub mod access;
pub mod editor;
pub mod error;
pub mod flatten;
pub mod json;
pub mod path;
pub mod query;

pub use editor::{
    InsideEdge, Insertion, Placement, insert, insert_adjacent, insert_into, remove_by_id,
};
pub use error::{EditError, TreeError};
pub use flatten::{FlatMap, flatten, flatten_json, flatten_leaves};
pub use json::{TreeOpts, load_document, parse_document, write_document};
pub use query::{
    all_sibling_ids, children_json, descendant_ids, elder_sibling_id, first_child_id,
    has_children, is_first_child, is_last_child, next_younger_sibling_id, parent_id,
    sibling_element_paths, topmost_ancestor_id, younger_sibling_ids,
};
