use async_trait::async_trait;

use crate::errors::ProviderError;

use super::records::{CabinetRecord, CgvRecord, ClientRecord};

/// Upstream data sources consulted during a recompute.
///
/// `Ok(None)` means the fetch succeeded but no record exists yet; `Err`
/// means the fetch itself failed. The scorer treats both as zero
/// contribution for that source and never propagates either to its caller.
///
/// Carried by callers as `&dyn ProfileProvider`; the production
/// implementation wraps the HTTP API client, which is outside this crate.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn cabinet(&self) -> Result<Option<CabinetRecord>, ProviderError>;
    async fn cgv(&self) -> Result<Option<CgvRecord>, ProviderError>;
    async fn clients(&self) -> Result<Vec<ClientRecord>, ProviderError>;
}
