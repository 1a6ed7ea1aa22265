//! Error types for butterfly-transit
//!
//! Construction and ingestion failures use [`Error`]; the expected outcomes of a
//! route query ("stop not found", "no path") use [`QueryError`] so callers can
//! branch on them without touching the fatal taxonomy.

use thiserror::Error;

/// Main error type for butterfly-transit operations
#[derive(Debug, Error)]
pub enum Error {
    /// Consecutive stops of a route with no road distance in either direction
    #[error("no road distance between '{from}' and '{to}' in either direction")]
    MissingDistance { from: String, to: String },

    /// Stop name not present in the network
    #[error("stop '{0}' not found")]
    StopNotFound(String),

    /// Route name not present in the network
    #[error("route '{0}' not found")]
    RouteNotFound(String),

    /// Stop registered twice during ingestion
    #[error("stop '{0}' is already defined")]
    DuplicateStop(String),

    /// Route registered twice during ingestion
    #[error("route '{0}' is already defined")]
    DuplicateRoute(String),

    /// Route declared without any stop
    #[error("route '{0}' has no stops")]
    EmptyRoute(String),

    /// Invalid or missing routing settings
    #[error("invalid routing settings: {0}")]
    InvalidSettings(String),

    /// Malformed request document
    #[error("invalid request document: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable outcome of a single route query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Endpoint is not a stop served by any route
    #[error("stop '{0}' not found")]
    StopNotFound(String),

    /// Both endpoints exist but the graph does not connect them
    #[error("no path from '{from}' to '{to}'")]
    NoPath { from: String, to: String },
}

/// Convenience result type for butterfly-transit operations
pub type Result<T> = std::result::Result<T, Error>;
