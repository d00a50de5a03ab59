use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use axum_valid::{Valid, ValidRejection};

use claim_geo_application::error::AppError;
use domain::report::ReportKey;

use crate::incoming::http_axum::{
    dto::{requests::ReportQuery, responses::ReportResponse},
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;

pub async fn get_report(
    State(state): State<AppState>,
    query: Result<Valid<Query<ReportQuery>>, ValidRejection<QueryRejection>>,
) -> Result<Response, HttpError> {
    let Valid(Query(query)) = query.map_err(|rejection| {
        let message = match rejection {
            ValidRejection::Valid(errors) => errors.to_string(),
            ValidRejection::Inner(rejection) => rejection.body_text(),
        };
        HttpError(AppError::BadRequest { message })
    })?;

    let key = ReportKey::new(
        query.state.as_deref(),
        query.district.as_deref(),
        query.village.as_deref(),
    )
    .map_err(|e| HttpError(AppError::from(e)))?;

    let outcome = state
        .report_service
        .get_report(&key, query.bypass_cache())
        .await
        .map_err(HttpError)?;

    Ok(ReportResponse(outcome).into_response())
}
