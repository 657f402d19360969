use thiserror::Error;

/// Failure acquiring the roster. Unlike per-participant errors, these are
/// fatal to the run: without a roster there is nothing to process.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} downloading roster from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot read roster file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
