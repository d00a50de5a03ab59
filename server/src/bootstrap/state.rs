use std::{sync::Arc, time::Duration};
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use claim_geo_adapters::outgoing::{
    arcgis_reqwest::boundary_query_arcgis::{ArcGisBoundaryQuery, BoundaryEndpoints},
    clock::system_clock::SystemClock,
    memory::{
        report_cache_memory::InMemoryReportCache,
        resolution_cache_memory::InMemoryResolutionCache,
    },
    report_http::report_upstream_reqwest::ReqwestReportUpstream,
};
use claim_geo_adapters::shared::app_state::AppState as AdaptersAppState;
use claim_geo_application::{
    enrichment::service::{EnrichmentSettings, MapPointsService},
    error::AppError,
    infrastructure_config::Config,
    location::resolver::LocationResolver,
    ports::{
        incoming::{
            location::{MapPointsUseCase, ResolveLocationUseCase},
            report::ReportQueryUseCase,
        },
        outgoing::{
            boundary_query::BoundaryQueryPort, clock::ClockPort, report_cache::ReportCachePort,
            report_upstream::ReportUpstreamPort, resolution_cache::ResolutionCachePort,
        },
    },
    report::service::{ReportService, ReportSettings},
};

const REPORT_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<dyn ResolveLocationUseCase>,
    pub map_points_service: Arc<dyn MapPointsUseCase>,
    pub report_service: Arc<dyn ReportQueryUseCase>,
    report_cache: Arc<InMemoryReportCache>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let config = Arc::new(config);

        let resolver = Self::create_resolver(&config)?;
        let map_points_service = Self::create_map_points_service(&config, &resolver);
        let (report_service, report_cache) = Self::create_report_service(&config)?;

        Ok(Self {
            config,
            resolver,
            map_points_service,
            report_service,
            report_cache,
        })
    }

    fn create_resolver(config: &Config) -> Result<Arc<dyn ResolveLocationUseCase>, AppError> {
        let endpoints = BoundaryEndpoints {
            village: config.boundary.village_service_url.clone(),
            district: config.boundary.district_service_url.clone(),
            state: config.boundary.state_service_url.clone(),
        };
        let boundary: Arc<dyn BoundaryQueryPort> = Arc::new(
            ArcGisBoundaryQuery::new(endpoints, config.boundary_request_timeout()).map_err(|e| {
                AppError::ConfigError {
                    message: format!("Failed to build boundary HTTP client: {e}"),
                }
            })?,
        );
        let cache: Arc<dyn ResolutionCachePort> =
            Arc::new(InMemoryResolutionCache::new(config.resolver.cache_capacity));

        Ok(Arc::new(LocationResolver::new(boundary, cache)))
    }

    fn create_map_points_service(
        config: &Config,
        resolver: &Arc<dyn ResolveLocationUseCase>,
    ) -> Arc<dyn MapPointsUseCase> {
        Arc::new(MapPointsService::new(
            Arc::clone(resolver),
            EnrichmentSettings {
                concurrency: config.resolver.enrichment_concurrency,
                max_records: config.resolver.max_records,
            },
        ))
    }

    fn create_report_service(
        config: &Config,
    ) -> Result<(Arc<dyn ReportQueryUseCase>, Arc<InMemoryReportCache>), AppError> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
        let report_cache = Arc::new(InMemoryReportCache::new(clock, config.report_ttl()));
        let upstream: Arc<dyn ReportUpstreamPort> = Arc::new(
            ReqwestReportUpstream::new(&config.report.upstream_base_url).map_err(|e| {
                AppError::ConfigError {
                    message: format!("Invalid report upstream URL: {e}"),
                }
            })?,
        );

        let service = ReportService::new(
            Arc::clone(&report_cache) as Arc<dyn ReportCachePort>,
            upstream,
            ReportSettings {
                timeout: config.report_timeout(),
                slow_threshold: config.report_slow_threshold(),
            },
        );

        Ok((Arc::new(service), report_cache))
    }

    /// Periodically drops expired reports so entries nobody asks for again
    /// do not linger.
    pub fn spawn_report_cache_purge(&self) {
        let cache = Arc::clone(&self.report_cache);
        tokio::spawn(async move {
            let mut purge_interval = interval(REPORT_PURGE_INTERVAL);
            purge_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                purge_interval.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!("Purged {} expired report cache entries", purged);
                }
            }
        });
    }

    #[must_use]
    pub fn to_adapters_state(&self) -> AdaptersAppState {
        AdaptersAppState {
            config: Arc::clone(&self.config),
            resolve_location_service: Arc::clone(&self.resolver),
            map_points_service: Arc::clone(&self.map_points_service),
            report_service: Arc::clone(&self.report_service),
        }
    }
}
