use std::sync::{Mutex, PoisonError};
use tracing::debug;

use claim_geo_application::ports::outgoing::resolution_cache::ResolutionCachePort;
use domain::{
    bounded_cache::BoundedCache,
    location::{NormalizedKey, ResolvedPoint},
};

/// Process-wide resolution cache. The lock only guards map operations and is
/// never held across an await.
pub struct InMemoryResolutionCache {
    entries: Mutex<BoundedCache<NormalizedKey, ResolvedPoint>>,
}

impl InMemoryResolutionCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(BoundedCache::new(capacity)),
        }
    }
}

impl ResolutionCachePort for InMemoryResolutionCache {
    fn get(&self, key: &NormalizedKey) -> Option<ResolvedPoint> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    fn put(&self, key: NormalizedKey, value: ResolvedPoint) {
        let evicted = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);

        if let Some(evicted) = evicted {
            debug!("Resolution cache full, evicted {}", evicted);
        }
    }

    fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
