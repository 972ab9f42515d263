//! Client-side engine for the mission-letter onboarding dashboard.
//!
//! Two leaf utilities with no dependency on the rendering layer:
//! - [`completion`] — aggregates independently fallible data sources into a
//!   0–100 profile-completion score and persists it.
//! - [`theme`] — the dark/light preference store sharing the same
//!   persistence pattern.
//!
//! Both talk to durable storage through the injected [`StoragePort`], so
//! hosts can back them with browser-origin storage, a JSON file, or memory.

pub mod completion;
pub mod errors;
pub mod storage;
pub mod theme;

pub use completion::{
    completion_steps, CabinetRecord, CgvRecord, ClientRecord, CompletionReport, CompletionScorer,
    CompletionStep, CompletionWeights, ProfileProvider, SourceKey, SourceOutcome, SourceStatus,
    DEFAULT_COMPLETION,
};
pub use errors::{ProviderError, StorageError};
pub use storage::{JsonFileStore, MemoryStore, StoragePort};
pub use theme::{AmbientTheme, DarkModeFlag, FixedAmbient, Theme, ThemeStore};

/// Installs a fmt subscriber so absorbed-failure warnings show up in test
/// output. Safe to call from every test; later calls are no-ops.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME")))
        }))
        .with_test_writer()
        .try_init();
}
