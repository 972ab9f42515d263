use thiserror::Error;

/// Failures of the injected storage port.
///
/// Every caller in this crate treats a storage failure as "nothing stored"
/// and falls back; none of these variants is fatal to the host.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored data corrupt: {0}")]
    Corrupt(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of an upstream data-source fetch.
///
/// Absorbed at per-source granularity by the scorer: a failed source
/// contributes zero weight and never aborts the overall recompute.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("upstream returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("not authenticated")]
    Unauthenticated,

    #[error("fetch timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}
