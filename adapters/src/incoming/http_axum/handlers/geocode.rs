use axum::{
    Json,
    extract::{Query, State},
};

use crate::incoming::http_axum::dto::{
    requests::ResolveQuery,
    responses::{ApiResponse, CacheClearedResponse, ResolvedPointResponse},
};
use crate::shared::app_state::AppState;

pub async fn resolve_location(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Json<ApiResponse<ResolvedPointResponse>> {
    let resolved = state
        .resolve_location_service
        .resolve(&query.location_key())
        .await;

    Json(ApiResponse::success_with_data(Some(resolved.into())))
}

pub async fn clear_resolution_cache(
    State(state): State<AppState>,
) -> Json<ApiResponse<CacheClearedResponse>> {
    let cleared = state.resolve_location_service.cached_entries();
    state.resolve_location_service.clear_cache();
    tracing::info!("Resolution cache cleared ({} entries)", cleared);

    Json(ApiResponse::success_with_data(Some(CacheClearedResponse {
        cleared,
    })))
}
