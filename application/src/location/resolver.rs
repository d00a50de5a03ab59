use std::future::Future;
use tracing::{debug, instrument};

use domain::{
    geometry::centroid,
    location::{LocationKey, NormalizedKey, ResolvedPoint, Tier},
    point::Point,
};

use crate::ports::{
    incoming::location::ResolveLocationUseCase,
    outgoing::{
        boundary_query::{BoundaryLayer, DynBoundaryQueryPort},
        resolution_cache::DynResolutionCachePort,
    },
};

use super::{
    fallbacks::{GLOBAL_DEFAULT_POINT, static_fallback},
    filters::{district_filters, state_filters, village_filters},
};

/// Village → district → state → static table → country default.
///
/// Each boundary tier is memoized under its own key, so a village miss never
/// hides the district entry shared by its siblings.
pub struct LocationResolver {
    boundary: DynBoundaryQueryPort,
    cache: DynResolutionCachePort,
}

impl LocationResolver {
    pub fn new(boundary: DynBoundaryQueryPort, cache: DynResolutionCachePort) -> Self {
        Self { boundary, cache }
    }

    #[instrument(skip(self, key), fields(location = %key))]
    pub async fn resolve(&self, key: &LocationKey) -> ResolvedPoint {
        let Some(state) = key.state() else {
            debug!("No state given, using global default");
            return ResolvedPoint::new(GLOBAL_DEFAULT_POINT, Tier::GlobalDefault);
        };

        if let (Some(district), Some(village)) = (key.district(), key.village()) {
            if let Some(resolved) = self.resolve_village(state, district, village).await {
                return resolved;
            }
        }

        if let Some(district) = key.district() {
            if let Some(resolved) = self.resolve_district(state, district).await {
                return resolved;
            }
        }

        if let Some(resolved) = self.resolve_state(state).await {
            return resolved;
        }

        debug!("Every tier missed, using global default");
        ResolvedPoint::new(GLOBAL_DEFAULT_POINT, Tier::GlobalDefault)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    async fn resolve_village(
        &self,
        state: &str,
        district: &str,
        village: &str,
    ) -> Option<ResolvedPoint> {
        self.get_or_compute(NormalizedKey::village(state, district, village), || async {
            self.first_centroid(
                BoundaryLayer::Village,
                village_filters(state, district, village),
            )
            .await
            .map(|point| ResolvedPoint::new(point, Tier::Village))
        })
        .await
    }

    async fn resolve_district(&self, state: &str, district: &str) -> Option<ResolvedPoint> {
        self.get_or_compute(NormalizedKey::district(state, district), || async {
            self.first_centroid(BoundaryLayer::District, district_filters(state, district))
                .await
                .map(|point| ResolvedPoint::new(point, Tier::District))
        })
        .await
    }

    async fn resolve_state(&self, state: &str) -> Option<ResolvedPoint> {
        self.get_or_compute(NormalizedKey::state(state), || async {
            if let Some(point) = self
                .first_centroid(BoundaryLayer::State, state_filters(state))
                .await
            {
                return Some(ResolvedPoint::new(point, Tier::State));
            }

            static_fallback(state).map(|point| {
                debug!("State layer missed, using static centroid for {}", state);
                ResolvedPoint::new(point, Tier::StaticFallback)
            })
        })
        .await
    }

    /// Memoizes one tier. Misses are not cached so a later upstream fix is
    /// picked up without a restart.
    async fn get_or_compute<F, Fut>(&self, key: NormalizedKey, compute: F) -> Option<ResolvedPoint>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<ResolvedPoint>>,
    {
        if let Some(cached) = self.cache.get(&key) {
            debug!("Resolution cache hit for {}", key);
            return Some(cached);
        }

        let resolved = compute().await?;
        self.cache.put(key, resolved);
        Some(resolved)
    }

    /// Tries each filter in order; the first one whose geometry yields a
    /// valid centroid wins.
    async fn first_centroid(&self, layer: BoundaryLayer, filters: Vec<String>) -> Option<Point> {
        for (attempt, where_clause) in filters.iter().enumerate() {
            let Some(geometry) = self.boundary.query(layer, where_clause).await else {
                continue;
            };

            match centroid(&geometry).filter(Point::is_valid) {
                Some(point) => {
                    debug!(
                        "{} layer matched on variant {} at {}",
                        layer,
                        attempt + 1,
                        point
                    );
                    return Some(point);
                }
                None => debug!(
                    "{} layer returned geometry without a usable centroid on variant {}",
                    layer,
                    attempt + 1
                ),
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl ResolveLocationUseCase for LocationResolver {
    async fn resolve(&self, key: &LocationKey) -> ResolvedPoint {
        self.resolve(key).await
    }

    fn clear_cache(&self) {
        self.clear_cache();
    }

    fn cached_entries(&self) -> usize {
        self.cached_entries()
    }
}
