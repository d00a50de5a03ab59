use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use domain::report::{CachedReport, ReportKey, UpstreamReport};

use crate::{
    error::{AppError, AppResult},
    ports::{
        incoming::report::ReportQueryUseCase,
        outgoing::{
            report_cache::DynReportCachePort,
            report_upstream::{DynReportUpstreamPort, UpstreamFetchError},
        },
    },
};

#[derive(Debug, Clone, Copy)]
pub struct ReportSettings {
    pub timeout: Duration,
    /// Fetches slower than this are logged as warnings.
    pub slow_threshold: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    #[must_use]
    pub fn as_header_value(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub url: String,
    pub status_code: u16,
    pub content_type: String,
    pub body: String,
    pub is_json: bool,
    pub cache_status: CacheStatus,
}

impl ReportOutcome {
    fn hit(cached: CachedReport) -> Self {
        Self {
            url: cached.url,
            status_code: cached.status_code,
            content_type: cached.content_type,
            body: cached.body,
            is_json: cached.is_json,
            cache_status: CacheStatus::Hit,
        }
    }

    fn miss(cached: CachedReport) -> Self {
        Self {
            cache_status: CacheStatus::Miss,
            ..Self::hit(cached)
        }
    }

    fn passthrough(report: UpstreamReport) -> Self {
        let is_json = report.is_json();
        Self {
            url: report.url,
            status_code: report.status_code,
            content_type: report.content_type,
            body: report.body,
            is_json,
            cache_status: CacheStatus::Miss,
        }
    }

    /// Body as sent to the client. JSON objects get the upstream `url`
    /// added unless they already carry one; anything else is returned as is.
    #[must_use]
    pub fn rendered_body(&self) -> String {
        if !self.is_json {
            return self.body.clone();
        }

        match serde_json::from_str::<Value>(&self.body) {
            Ok(Value::Object(mut map)) => {
                map.entry("url")
                    .or_insert_with(|| Value::String(self.url.clone()));
                Value::Object(map).to_string()
            }
            _ => self.body.clone(),
        }
    }
}

pub struct ReportService {
    cache: DynReportCachePort,
    upstream: DynReportUpstreamPort,
    settings: ReportSettings,
}

impl ReportService {
    pub fn new(
        cache: DynReportCachePort,
        upstream: DynReportUpstreamPort,
        settings: ReportSettings,
    ) -> Self {
        Self {
            cache,
            upstream,
            settings,
        }
    }

    #[instrument(skip(self, key), fields(state = key.state()))]
    pub async fn get_report(&self, key: &ReportKey, no_cache: bool) -> AppResult<ReportOutcome> {
        let cached = if no_cache { None } else { self.cache.get(key) };
        if let Some(cached) = cached {
            debug!("Report cache hit, fetched at {}", cached.fetched_at);
            return Ok(ReportOutcome::hit(cached));
        }

        let started = Instant::now();
        let fetched = self
            .upstream
            .fetch_report(key, self.settings.timeout)
            .await;
        let elapsed = started.elapsed();

        let report = fetched.map_err(|e| {
            warn!("Report upstream failed after {:?}: {}", elapsed, e);
            match e {
                UpstreamFetchError::Timeout { timeout_ms } => AppError::UpstreamTimeout { timeout_ms },
                UpstreamFetchError::Failed(message) => AppError::UpstreamError { message },
            }
        })?;

        if elapsed > self.settings.slow_threshold {
            warn!(
                "Slow report upstream: {:?} for {} (status {})",
                elapsed, report.url, report.status_code
            );
        }

        if !report.is_success() {
            info!(
                "Report upstream answered {}, not caching",
                report.status_code
            );
            return Ok(ReportOutcome::passthrough(report));
        }

        let cached = self.cache.put(key.clone(), report);
        Ok(ReportOutcome::miss(cached))
    }
}

#[async_trait::async_trait]
impl ReportQueryUseCase for ReportService {
    async fn get_report(&self, key: &ReportKey, no_cache: bool) -> AppResult<ReportOutcome> {
        self.get_report(key, no_cache).await
    }

    fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
