//! The completion scorer: weighted aggregation over independently fallible
//! sources, with log-and-continue semantics per source and a persisted
//! integer score as the sole durable artifact.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ProviderError;
use crate::storage::{StoragePort, COMPLETION_KEY};

use super::provider::ProfileProvider;
use super::records::{filled_count, ClientRecord, FieldRecord};

/// Score used when nothing is stored yet or the computation itself fails.
pub const DEFAULT_COMPLETION: u8 = 25;

/// Maximum percentage points each source can contribute.
///
/// A policy constant in this version, not a pluggable schema; the default
/// weights sum to 100 but the aggregation computes the total rather than
/// assuming it, so rebalancing stays safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionWeights {
    pub account: u32,
    pub cabinet: u32,
    pub cgv: u32,
    pub clients: u32,
    /// Weighted points granted per client record, up to the clients cap.
    pub points_per_client: u32,
}

impl Default for CompletionWeights {
    fn default() -> Self {
        Self {
            account: 25,
            cabinet: 40,
            cgv: 20,
            clients: 15,
            points_per_client: 3,
        }
    }
}

impl CompletionWeights {
    pub fn total(&self) -> u32 {
        self.account + self.cabinet + self.cgv + self.clients
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKey {
    Account,
    Cabinet,
    Cgv,
    Clients,
}

/// What happened to one source during a recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Contributed its full weight.
    Satisfied,
    /// Record present but incomplete: `filled` of `total` fields hold a
    /// value (for the roster source, clients present of clients needed to
    /// reach the cap).
    Partial { filled: usize, total: usize },
    /// Fetch succeeded but no record (or no roster rows) exists yet.
    Missing,
    /// Fetch failed; absorbed, contributed zero.
    Failed { reason: String },
}

/// Per-source result of a recompute, surfaced for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub key: SourceKey,
    pub weight: u32,
    pub points: u32,
    pub status: SourceStatus,
}

/// Full result of one recompute. Only `score` is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub score: u8,
    pub outcomes: Vec<SourceOutcome>,
    pub computed_at: DateTime<Utc>,
    /// False when the storage write failed or the fallback path was taken;
    /// a previously stored score survives in that case.
    pub persisted: bool,
}

pub struct CompletionScorer {
    storage: Arc<dyn StoragePort>,
    weights: CompletionWeights,
    source_timeout: Option<Duration>,
}

impl CompletionScorer {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            weights: CompletionWeights::default(),
            source_timeout: None,
        }
    }

    pub fn with_weights(mut self, weights: CompletionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Deadline applied to each source fetch independently. A source that
    /// exceeds it is treated as a failed fetch; the others are unaffected.
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = Some(timeout);
        self
    }

    /// Last persisted score, for synchronous consumption during initial
    /// paint. Absent, unparsable or out-of-range values fall back to
    /// [`DEFAULT_COMPLETION`]. Never fails; no I/O beyond the port read.
    pub fn stored_completion(&self) -> u8 {
        match self.storage.get(COMPLETION_KEY) {
            Ok(Some(raw)) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|score| *score <= 100)
                .unwrap_or(DEFAULT_COMPLETION),
            Ok(None) => DEFAULT_COMPLETION,
            Err(err) => {
                warn!("completion read failed, using default: {err}");
                DEFAULT_COMPLETION
            }
        }
    }

    /// Recomputes the score from current provider state and persists it,
    /// overwriting the previous value even when the new score is lower.
    ///
    /// Per-source failures are absorbed into [`SourceStatus::Failed`] with
    /// zero points. A failure of the computation itself (e.g. a zero total
    /// weight) yields the fallback score and leaves storage untouched.
    pub async fn recompute(&self, provider: &dyn ProfileProvider) -> CompletionReport {
        let outcomes = self.collect_outcomes(provider).await;
        match self.aggregate(&outcomes) {
            Ok(score) => {
                let persisted = match self.storage.set(COMPLETION_KEY, &score.to_string()) {
                    Ok(()) => {
                        debug!(score, "completion score persisted");
                        true
                    }
                    Err(err) => {
                        warn!("completion score not persisted: {err}");
                        false
                    }
                };
                CompletionReport {
                    score,
                    outcomes,
                    computed_at: Utc::now(),
                    persisted,
                }
            }
            Err(err) => {
                warn!("completion aggregation failed, falling back: {err}");
                CompletionReport {
                    score: DEFAULT_COMPLETION,
                    outcomes,
                    computed_at: Utc::now(),
                    persisted: false,
                }
            }
        }
    }

    async fn collect_outcomes(&self, provider: &dyn ProfileProvider) -> Vec<SourceOutcome> {
        // The fetches are independent; aggregation is a pure sum, so
        // concurrent resolution cannot change the result.
        let (cabinet, cgv, clients) = tokio::join!(
            self.bounded(provider.cabinet()),
            self.bounded(provider.cgv()),
            self.bounded(provider.clients()),
        );

        vec![
            // Registration is true by construction if this code runs.
            SourceOutcome {
                key: SourceKey::Account,
                weight: self.weights.account,
                points: self.weights.account,
                status: SourceStatus::Satisfied,
            },
            self.record_outcome(SourceKey::Cabinet, self.weights.cabinet, cabinet),
            self.record_outcome(SourceKey::Cgv, self.weights.cgv, cgv),
            self.roster_outcome(clients),
        ]
    }

    async fn bounded<T>(
        &self,
        fetch: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        match self.source_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .unwrap_or(Err(ProviderError::Timeout)),
            None => fetch.await,
        }
    }

    fn record_outcome<R: FieldRecord>(
        &self,
        key: SourceKey,
        weight: u32,
        fetched: Result<Option<R>, ProviderError>,
    ) -> SourceOutcome {
        match fetched {
            Ok(Some(record)) => {
                let values = record.field_values();
                let total = values.len();
                if total == 0 {
                    return SourceOutcome {
                        key,
                        weight,
                        points: 0,
                        status: SourceStatus::Missing,
                    };
                }
                let filled = filled_count(&values);
                let points = ((filled as f64 / total as f64) * f64::from(weight)).round() as u32;
                // Status reflects the fields themselves; rounding can push
                // the points of a near-full record up to the full weight.
                let status = if filled == total {
                    SourceStatus::Satisfied
                } else {
                    SourceStatus::Partial { filled, total }
                };
                SourceOutcome {
                    key,
                    weight,
                    points,
                    status,
                }
            }
            Ok(None) => SourceOutcome {
                key,
                weight,
                points: 0,
                status: SourceStatus::Missing,
            },
            Err(err) => self.failed(key, weight, err),
        }
    }

    fn roster_outcome(&self, fetched: Result<Vec<ClientRecord>, ProviderError>) -> SourceOutcome {
        let key = SourceKey::Clients;
        let weight = self.weights.clients;
        match fetched {
            Ok(clients) if clients.is_empty() => SourceOutcome {
                key,
                weight,
                points: 0,
                status: SourceStatus::Missing,
            },
            Ok(clients) => {
                let count = clients.len() as u32;
                let per_client = self.weights.points_per_client;
                let points = weight.min(per_client.saturating_mul(count));
                // Clients needed to reach the cap; unreachable if each
                // client is worth nothing.
                let needed = if per_client == 0 {
                    u32::MAX
                } else {
                    weight.div_ceil(per_client)
                };
                let status = if count >= needed {
                    SourceStatus::Satisfied
                } else {
                    SourceStatus::Partial {
                        filled: count as usize,
                        total: needed as usize,
                    }
                };
                SourceOutcome {
                    key,
                    weight,
                    points,
                    status,
                }
            }
            Err(err) => self.failed(key, weight, err),
        }
    }

    fn failed(&self, key: SourceKey, weight: u32, err: ProviderError) -> SourceOutcome {
        warn!(source = ?key, "source fetch failed, contributing zero: {err}");
        SourceOutcome {
            key,
            weight,
            points: 0,
            status: SourceStatus::Failed {
                reason: err.to_string(),
            },
        }
    }

    fn aggregate(&self, outcomes: &[SourceOutcome]) -> anyhow::Result<u8> {
        let total_weight: u32 = outcomes.iter().map(|o| o.weight).sum();
        if total_weight == 0 {
            return Err(anyhow!("total source weight is zero"));
        }
        let points: u32 = outcomes.iter().map(|o| o.points).sum();
        let score = ((f64::from(points) / f64::from(total_weight)) * 100.0).round() as u32;
        Ok(score.min(100) as u8)
    }
}
