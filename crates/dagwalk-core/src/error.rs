//! Error types and exit codes for dagwalk
//!
//! Two layers of errors live here:
//! - [`TraverseError`]: what the traversal engine returns. Generic over the
//!   caller's error type so visitor and retrieval errors come back verbatim.
//! - [`DagwalkError`]: crate-wide error for manifests, config and the CLI,
//!   with exit code mapping and a JSON envelope.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including an aborted traversal)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (unreadable or invalid manifest, unknown root)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Message carried by [`TraverseError::Internal`] when the BFS queue reports
/// elements it cannot produce.
pub const DEQUEUE_FAILURE: &str = "failed to dequeue though queue not empty";

/// Why a traversal stopped early.
///
/// Each caller-originated variant holds the caller's error unchanged, so a
/// test can compare it against the exact value the visitor, getter or
/// recovery function produced.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TraverseError<E> {
    /// The visitor returned an error.
    #[error("visit aborted traversal: {0}")]
    Visit(#[source] E),

    /// A link could not be resolved and no recovery function was set.
    #[error("failed to fetch node: {0}")]
    Fetch(#[source] E),

    /// The recovery function escalated a fetch failure.
    #[error("recovery aborted traversal: {0}")]
    Recovered(#[source] E),

    /// The engine's own bookkeeping is inconsistent. Never caused by callers.
    #[error("internal traversal failure: {0}")]
    Internal(&'static str),
}

impl<E> TraverseError<E> {
    /// True for engine defects, false for anything raised by a caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, TraverseError::Internal(_))
    }

    /// Borrow the caller's error, if this variant carries one.
    pub fn inner(&self) -> Option<&E> {
        match self {
            TraverseError::Visit(e) | TraverseError::Fetch(e) | TraverseError::Recovered(e) => {
                Some(e)
            }
            TraverseError::Internal(_) => None,
        }
    }

    /// Take the caller's error, if this variant carries one.
    pub fn into_inner(self) -> Option<E> {
        match self {
            TraverseError::Visit(e) | TraverseError::Fetch(e) | TraverseError::Recovered(e) => {
                Some(e)
            }
            TraverseError::Internal(_) => None,
        }
    }

    /// Short identifier used in logs and structured output
    pub fn kind(&self) -> &'static str {
        match self {
            TraverseError::Visit(_) => "visit",
            TraverseError::Fetch(_) => "fetch",
            TraverseError::Recovered(_) => "recovered",
            TraverseError::Internal(_) => "internal",
        }
    }
}

/// Exit codes for the dagwalk binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unreadable manifest, unknown root (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur outside the traversal engine itself
#[derive(Error, Debug)]
pub enum DagwalkError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("invalid manifest {path:?}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("node not found: {cid}")]
    NodeNotFound { cid: String },

    // Generic failures (exit code 1)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("traversal aborted ({kind}): {message}")]
    Traversal { kind: &'static str, message: String },

    #[error("{0}")]
    Other(String),
}

impl DagwalkError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        DagwalkError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a manifest that parsed but does not describe a usable DAG
    pub fn invalid_manifest(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        DagwalkError::InvalidManifest {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Flatten a traversal failure, keeping which kind of failure it was
    pub fn traversal<E: std::fmt::Display>(err: &TraverseError<E>) -> Self {
        let message = match err {
            TraverseError::Internal(msg) => msg.to_string(),
            other => other
                .inner()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };
        DagwalkError::Traversal {
            kind: err.kind(),
            message,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DagwalkError::UnknownFormat(_)
            | DagwalkError::UsageError(_)
            | DagwalkError::InvalidValue { .. } => ExitCode::Usage,

            DagwalkError::InvalidManifest { .. } | DagwalkError::NodeNotFound { .. } => {
                ExitCode::Data
            }

            DagwalkError::Json(_)
            | DagwalkError::Traversal { .. }
            | DagwalkError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            DagwalkError::UnknownFormat(_) => "unknown_format",
            DagwalkError::UsageError(_) => "usage_error",
            DagwalkError::InvalidValue { .. } => "invalid_value",
            DagwalkError::InvalidManifest { .. } => "invalid_manifest",
            DagwalkError::NodeNotFound { .. } => "node_not_found",
            DagwalkError::Json(_) => "json_error",
            DagwalkError::Traversal { .. } => "traversal_aborted",
            DagwalkError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let DagwalkError::Traversal { kind, .. } = self {
            error_obj["kind"] = serde_json::json!(kind);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for dagwalk operations
pub type Result<T> = std::result::Result<T, DagwalkError>;
