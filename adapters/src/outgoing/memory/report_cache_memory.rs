use dashmap::DashMap;
use std::time::Duration;
use tracing::debug;

use claim_geo_application::ports::outgoing::{clock::DynClockPort, report_cache::ReportCachePort};
use domain::report::{CachedReport, ReportKey, UpstreamReport};

/// TTL cache of upstream reports keyed by the full query.
pub struct InMemoryReportCache {
    entries: DashMap<ReportKey, CachedReport>,
    clock: DynClockPort,
    ttl: Duration,
}

impl InMemoryReportCache {
    pub fn new(clock: DynClockPort, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            ttl,
        }
    }

    /// Drops every expired entry, returning how many went.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(now, self.ttl));
        before.saturating_sub(self.entries.len())
    }
}

impl ReportCachePort for InMemoryReportCache {
    fn get(&self, key: &ReportKey) -> Option<CachedReport> {
        let now = self.clock.now();

        let fresh = self
            .entries
            .get(key)
            .map(|entry| entry.is_fresh(now, self.ttl).then(|| entry.value().clone()))?;

        if fresh.is_none() {
            self.entries
                .remove_if(key, |_, entry| !entry.is_fresh(now, self.ttl));
            debug!("Report cache entry for {} expired", key.state());
        }
        fresh
    }

    fn put(&self, key: ReportKey, report: UpstreamReport) -> CachedReport {
        let cached = CachedReport::from_upstream(report, self.clock.now());
        self.entries.insert(key, cached.clone());
        cached
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex, PoisonError},
        time::Instant,
    };

    use claim_geo_application::ports::outgoing::clock::ClockPort;

    use super::*;

    struct ManualClock(Mutex<Instant>);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Instant::now())))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap_or_else(PoisonError::into_inner) += by;
        }
    }

    impl ClockPort for ManualClock {
        fn now(&self) -> Instant {
            *self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    const TTL: Duration = Duration::from_secs(300);

    fn cache(clock: &Arc<ManualClock>) -> InMemoryReportCache {
        InMemoryReportCache::new(Arc::clone(clock) as DynClockPort, TTL)
    }

    fn key() -> ReportKey {
        ReportKey::new(Some("Odisha"), Some("Cuttack"), None).unwrap()
    }

    fn report(body: &str) -> UpstreamReport {
        UpstreamReport {
            url: "http://reports.test/report?state=Odisha&district=Cuttack".to_string(),
            status_code: 200,
            content_type: "application/json".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn entry_is_served_until_ttl_then_removed() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        cache.put(key(), report("{}"));

        clock.advance(TTL - Duration::from_millis(1));
        assert!(cache.get(&key()).is_some());

        clock.advance(Duration::from_millis(2));
        assert!(cache.get(&key()).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn entry_exactly_at_ttl_is_fresh() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        cache.put(key(), report("{}"));

        clock.advance(TTL);
        assert!(cache.get(&key()).is_some());
    }

    #[test]
    fn put_overwrites_and_restamps() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        cache.put(key(), report(r#"{"v":1}"#));

        clock.advance(Duration::from_secs(200));
        cache.put(key(), report(r#"{"v":2}"#));
        clock.advance(Duration::from_secs(200));

        let entry = cache.get(&key()).unwrap();
        assert_eq!(entry.body, r#"{"v":2}"#);
        assert!(entry.is_json);
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        cache.put(key(), report("{}"));
        clock.advance(Duration::from_secs(250));
        let other = ReportKey::new(Some("Goa"), None, None).unwrap();
        cache.put(other.clone(), report("{}"));

        clock.advance(Duration::from_secs(100));
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.get(&other).is_some());
        assert_eq!(cache.len(), 1);
    }
}
