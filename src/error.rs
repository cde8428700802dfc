//! Error taxonomy for the crawler
//!
//! Three layers with different propagation rules: fetch-layer and
//! structural-validation errors are always recovered at the resource, page,
//! or entry that produced them; run-level errors abort before any concurrent
//! work starts and map to a process exit code.

use thiserror::Error;

/// Failure of a single JSON fetch attempt. No retries happen at this layer;
/// every caller treats a failure as terminal for that one fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent, or timed out.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response carried a non-success status code.
    #[error("unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to resolve one resource or catalog page. Recovered by the
/// orchestrator: the failing resource contributes nothing, siblings proceed.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The resource descriptor has no `@id` to fetch.
    #[error("resource descriptor has no '@id' field")]
    MissingId,

    /// A flat listing document without a `data` array.
    #[error("document at {url} has no 'data' array")]
    MissingData { url: String },

    /// A catalog root or page without an `items` array.
    #[error("document at {url} has no 'items' array")]
    MissingItems { url: String },
}

/// Fatal, run-level failure. Nothing has been crawled when one of these is
/// raised; each class maps to its own exit status.
#[derive(Debug, Error)]
pub enum RunError {
    /// The service index itself could not be fetched or decoded.
    #[error("failed to fetch service index: {0}")]
    Index(#[from] FetchError),

    /// The service index has no `resources` array.
    #[error("service index at {url} has no 'resources' field")]
    MissingResources { url: String },

    /// A reserved command whose behavior is not defined.
    #[error("the '{0}' command is not implemented")]
    UnsupportedCommand(String),
}

impl RunError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Index(_) => 3,
            RunError::MissingResources { .. } => 4,
            RunError::UnsupportedCommand(_) => 5,
        }
    }
}
