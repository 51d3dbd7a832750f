//! Error types for help rendering.

use std::path::PathBuf;

/// Failure of a single Markdown rendering call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Transport failure: DNS, connect, TLS, timeout.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Non-2xx answer, reported only when status checking is enabled.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failure of a help bundle build. Aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The project root could not be enumerated.
    #[error("failed to list {}: {source}", path.display())]
    Locate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Markdown source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendering endpoint failed for a source.
    #[error("failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// A help page could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
