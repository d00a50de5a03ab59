use domain::report::{CachedReport, ReportKey, UpstreamReport};
use std::sync::Arc;

pub trait ReportCachePort: Send + Sync {
    /// Returns a fresh entry. A stale entry is removed and `None` returned.
    fn get(&self, key: &ReportKey) -> Option<CachedReport>;

    /// Always overwrites, stamping the current time.
    fn put(&self, key: ReportKey, report: UpstreamReport) -> CachedReport;

    fn len(&self) -> usize;
}

pub type DynReportCachePort = Arc<dyn ReportCachePort>;
