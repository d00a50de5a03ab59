use domain::{
    claim::{ClaimRecord, MapFeatureCollection},
    location::{LocationKey, ResolvedPoint},
};

#[async_trait::async_trait]
pub trait ResolveLocationUseCase: Send + Sync {
    /// Always produces a point; the tier says how much to trust it.
    async fn resolve(&self, key: &LocationKey) -> ResolvedPoint;

    fn clear_cache(&self);

    fn cached_entries(&self) -> usize;
}

#[async_trait::async_trait]
pub trait MapPointsUseCase: Send + Sync {
    async fn map_points(&self, records: Vec<ClaimRecord>) -> MapFeatureCollection;
}
