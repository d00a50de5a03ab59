use axum::{
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::CONTENT_TYPE,
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;

use claim_geo_application::report::service::ReportOutcome;
use domain::location::{ResolvedPoint, Tier};

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success_with_data(data: Option<T>) -> Self {
        Self {
            ok: true,
            error: None,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPointResponse {
    pub lon: f64,
    pub lat: f64,
    pub tier: Tier,
}

impl From<ResolvedPoint> for ResolvedPointResponse {
    fn from(resolved: ResolvedPoint) -> Self {
        Self {
            lon: resolved.point.lon,
            lat: resolved.point.lat,
            tier: resolved.tier,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheClearedResponse {
    pub cleared: usize,
}

/// Upstream report relayed with its own status and content type.
pub struct ReportResponse(pub ReportOutcome);

impl IntoResponse for ReportResponse {
    fn into_response(self) -> Response {
        let outcome = self.0;
        let status = StatusCode::from_u16(outcome.status_code).unwrap_or(StatusCode::BAD_GATEWAY);

        let mut headers = HeaderMap::new();
        if let Ok(content_type) = HeaderValue::from_str(&outcome.content_type) {
            headers.insert(CONTENT_TYPE, content_type);
        }
        headers.insert(
            X_CACHE,
            HeaderValue::from_static(outcome.cache_status.as_header_value()),
        );

        (status, headers, outcome.rendered_body()).into_response()
    }
}
