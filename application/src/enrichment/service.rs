use futures::{StreamExt, stream};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info, instrument};

use domain::claim::{ClaimRecord, MapFeature, MapFeatureCollection};

use crate::ports::incoming::location::{MapPointsUseCase, ResolveLocationUseCase};

#[derive(Debug, Clone, Copy)]
pub struct EnrichmentSettings {
    pub concurrency: usize,
    pub max_records: usize,
}

/// Turns claim records into map points, resolving the ones whose captured
/// coordinate is missing or invalid.
pub struct MapPointsService {
    resolver: Arc<dyn ResolveLocationUseCase>,
    settings: EnrichmentSettings,
}

impl MapPointsService {
    pub fn new(resolver: Arc<dyn ResolveLocationUseCase>, settings: EnrichmentSettings) -> Self {
        Self {
            resolver,
            settings: EnrichmentSettings {
                concurrency: settings.concurrency.max(1),
                max_records: settings.max_records,
            },
        }
    }

    /// Output order matches input order. At most `concurrency` resolutions
    /// are in flight at once.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn map_points(&self, records: Vec<ClaimRecord>) -> MapFeatureCollection {
        let received = records.len();

        let features: Vec<MapFeature> = stream::iter(records.into_iter().take(self.settings.max_records))
            .map(|record| self.to_feature(record))
            .buffered(self.settings.concurrency)
            .collect()
            .await;

        if received > features.len() {
            info!(
                "Map points capped at {} of {} records",
                features.len(),
                received
            );
        }

        let mut by_tier: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut approximate = 0_usize;
        for feature in &features {
            let label = feature.properties.tier.map_or("captured", |tier| tier.as_str());
            *by_tier.entry(label).or_default() += 1;
            if feature.properties.tier.is_some_and(|tier| !tier.is_geocoded()) {
                approximate += 1;
            }
        }
        debug!("Map points by source: {:?}", by_tier);
        if approximate > 0 {
            info!(
                "{} of {} map points placed without boundary geometry",
                approximate,
                features.len()
            );
        }

        MapFeatureCollection::new(features)
    }

    async fn to_feature(&self, record: ClaimRecord) -> MapFeature {
        if let Some(point) = record.captured_point() {
            return MapFeature::new(record, point, None);
        }

        let resolved = self.resolver.resolve(&record.location_key()).await;
        MapFeature::from_resolved(record, resolved)
    }
}

#[async_trait::async_trait]
impl MapPointsUseCase for MapPointsService {
    async fn map_points(&self, records: Vec<ClaimRecord>) -> MapFeatureCollection {
        self.map_points(records).await
    }
}
