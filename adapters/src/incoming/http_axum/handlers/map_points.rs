use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use axum_valid::{Valid, ValidRejection};

use claim_geo_application::error::AppError;
use domain::claim::MapFeatureCollection;

use crate::incoming::http_axum::{dto::requests::MapPointsRequest, error_mapper::HttpError};
use crate::shared::app_state::AppState;

pub async fn map_points(
    State(state): State<AppState>,
    payload: Result<Valid<Json<MapPointsRequest>>, ValidRejection<JsonRejection>>,
) -> Result<Json<MapFeatureCollection>, HttpError> {
    let Valid(Json(request)) = payload.map_err(|rejection| {
        let message = match rejection {
            ValidRejection::Valid(errors) => errors.to_string(),
            ValidRejection::Inner(rejection) => rejection.body_text(),
        };
        HttpError(AppError::ValidationError { message })
    })?;

    let collection = state.map_points_service.map_points(request.records).await;
    Ok(Json(collection))
}
