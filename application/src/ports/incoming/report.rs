use domain::report::ReportKey;

use crate::{error::AppResult, report::service::ReportOutcome};

#[async_trait::async_trait]
pub trait ReportQueryUseCase: Send + Sync {
    /// Serves a fresh cached report unless `no_cache` is set, otherwise
    /// fetches upstream and repopulates the cache.
    async fn get_report(&self, key: &ReportKey, no_cache: bool) -> AppResult<ReportOutcome>;

    fn cached_entries(&self) -> usize;
}
