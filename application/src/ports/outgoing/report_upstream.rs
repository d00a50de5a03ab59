use domain::report::{ReportKey, UpstreamReport};
use std::{sync::Arc, time::Duration};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamFetchError {
    #[error("upstream timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("upstream request failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
pub trait ReportUpstreamPort: Send + Sync {
    /// Fetches the report, abandoning the request once `timeout` elapses.
    async fn fetch_report(
        &self,
        key: &ReportKey,
        timeout: Duration,
    ) -> Result<UpstreamReport, UpstreamFetchError>;
}

pub type DynReportUpstreamPort = Arc<dyn ReportUpstreamPort>;
