use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::incoming::http_axum::dto::responses::ApiResponse;
use crate::shared::app_state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success_with_data(Some(json!({
        "resolution_cache_entries": state.resolve_location_service.cached_entries(),
        "report_cache_entries": state.report_service.cached_entries(),
        "config": {
            "cache_capacity": state.config.resolver.cache_capacity,
            "enrichment_concurrency": state.config.resolver.enrichment_concurrency,
            "max_records": state.config.resolver.max_records,
            "report_ttl_seconds": state.config.report.ttl_seconds,
            "report_timeout_ms": state.config.report.timeout_ms
        }
    }))))
}
