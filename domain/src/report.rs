use std::time::{Duration, Instant};
use time::OffsetDateTime;

use crate::error::{DomainError, DomainResult};

/// Query sent to the report generator, also the report cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    state: String,
    district: Option<String>,
    village: Option<String>,
}

impl ReportKey {
    pub fn new(
        state: Option<&str>,
        district: Option<&str>,
        village: Option<&str>,
    ) -> DomainResult<Self> {
        let state = trimmed(state).ok_or_else(|| {
            DomainError::InvalidLocation("Missing required parameter: state".to_string())
        })?;

        Ok(Self {
            state,
            district: trimmed(district),
            village: trimmed(village),
        })
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    #[must_use]
    pub fn village(&self) -> Option<&str> {
        self.village.as_deref()
    }

    /// Query pairs in the order the upstream expects them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("state", self.state.as_str())];
        if let Some(district) = self.district() {
            pairs.push(("district", district));
        }
        if let Some(village) = self.village() {
            pairs.push(("village", village));
        }
        pairs
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Raw upstream response before it is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReport {
    pub url: String,
    pub status_code: u16,
    pub content_type: String,
    pub body: String,
}

impl UpstreamReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type.contains("application/json")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedReport {
    pub url: String,
    pub stored_at: Instant,
    pub fetched_at: OffsetDateTime,
    pub status_code: u16,
    pub content_type: String,
    pub body: String,
    pub is_json: bool,
}

impl CachedReport {
    #[must_use]
    pub fn from_upstream(report: UpstreamReport, stored_at: Instant) -> Self {
        let is_json = report.is_json();
        Self {
            url: report.url,
            stored_at,
            fetched_at: OffsetDateTime::now_utc(),
            status_code: report.status_code,
            content_type: report.content_type,
            body: report.body,
            is_json,
        }
    }

    #[must_use]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    /// Entries exactly `ttl` old are still fresh.
    #[must_use]
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) <= ttl
    }
}
