use domain::location::{NormalizedKey, ResolvedPoint};
use std::sync::Arc;

/// Process-wide memo of tier lookups. Calls are synchronous and must not be
/// held across an await.
pub trait ResolutionCachePort: Send + Sync {
    fn get(&self, key: &NormalizedKey) -> Option<ResolvedPoint>;
    fn put(&self, key: NormalizedKey, value: ResolvedPoint);
    fn clear(&self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type DynResolutionCachePort = Arc<dyn ResolutionCachePort>;
