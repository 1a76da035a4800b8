//! Error kinds for tree queries and edits.

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TreeError {
    /// Input is not JSON in the labelled-array shape
    #[error("invalid document: {reason}")]
    Parse { reason: String },

    /// No node carries this identifier
    #[error("no id/path found for '{id}'")]
    NotFound { id: String },

    /// The operation needed at least one child
    #[error("node '{id}' has no children")]
    NoChildren { id: String },

    /// Unrecognized direction or mode string
    #[error("invalid directive '{directive}'")]
    InvalidDirective { directive: String },

    #[error("invalid operation '{operation}': {reason}")]
    InvalidOperation { operation: String, reason: String },

    /// Dotted path does not address a value in the document
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TreeError {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        TreeError::Parse {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(id: &str) -> Self {
        TreeError::NotFound { id: id.to_string() }
    }

    pub(crate) fn invalid_operation(operation: &str, reason: impl Into<String>) -> Self {
        TreeError::InvalidOperation {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error means the identifier could not be resolved
    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::NotFound { .. })
    }

    /// Check if this error came from malformed input
    pub fn is_parse_error(&self) -> bool {
        matches!(self, TreeError::Parse { .. } | TreeError::Json(_))
    }
}

/// Failure of a mutating operation, tagged with the step that failed.
#[derive(Debug, Error)]
#[error("{operation} - {step}: {source}")]
pub struct EditError {
    pub operation: &'static str,
    pub step: &'static str,
    #[source]
    pub source: TreeError,
}

impl EditError {
    pub(crate) fn at(
        operation: &'static str,
        step: &'static str,
    ) -> impl FnOnce(TreeError) -> Self {
        move |source| EditError {
            operation,
            step,
            source,
        }
    }

    /// The wrapped failure
    pub fn kind(&self) -> &TreeError {
        &self.source
    }

    /// JSON-shaped payload naming the failing step, e.g.
    /// `{"error":"jsontree.remove_by_id - resolve path"}`.
    pub fn payload(&self) -> String {
        serde_json::json!({
            "error": format!("jsontree.{} - {}", self.operation, self.step)
        })
        .to_string()
    }
}
