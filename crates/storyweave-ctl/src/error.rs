//! Error type for CLI commands.

use std::path::PathBuf;

use storyweave_sdk::CodegenError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CtlError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a widget description: {source}", path.display())]
    InvalidWidget {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

pub(crate) type CtlResult<T> = Result<T, CtlError>;
