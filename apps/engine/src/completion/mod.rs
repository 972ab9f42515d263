// Profile-completion scoring engine.
// Aggregates four weighted data sources into one 0–100 score, tolerating
// independent failure of any subset, and persists the result.

pub mod provider;
pub mod records;
pub mod scorer;
pub mod steps;

pub use provider::ProfileProvider;
pub use records::{fill_ratio, CabinetRecord, CgvRecord, ClientRecord, FieldRecord};
pub use scorer::{
    CompletionReport, CompletionScorer, CompletionWeights, SourceKey, SourceOutcome, SourceStatus,
    DEFAULT_COMPLETION,
};
pub use steps::{completion_steps, CompletionStep};
