use std::sync::Arc;

use claim_geo_application::{
    infrastructure_config::Config,
    ports::incoming::{
        location::{MapPointsUseCase, ResolveLocationUseCase},
        report::ReportQueryUseCase,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolve_location_service: Arc<dyn ResolveLocationUseCase>,
    pub map_points_service: Arc<dyn MapPointsUseCase>,
    pub report_service: Arc<dyn ReportQueryUseCase>,
}
