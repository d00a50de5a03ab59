use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::incoming::http_axum::{
    handlers::{
        geocode::{clear_resolution_cache, resolve_location},
        health::health_check,
        map_points::map_points,
        report::get_report,
    },
    router_ext::RouterExt,
};
use crate::shared::app_state::AppState;

pub fn build_application_router() -> Router<AppState> {
    let geocode_routes = Router::new()
        .route("/geocode/resolve", get(resolve_location))
        .route("/geocode/cache", delete(clear_resolution_cache))
        .route("/claims/map-points", post(map_points));

    let report_routes = Router::new().route("/report", get(get_report));

    Router::new()
        .route("/health", get(health_check))
        .merge(geocode_routes)
        .merge(report_routes)
        .with_request_id()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header::CONTENT_TYPE},
        response::Response,
    };
    use serde_json::{Value, json};
    use std::sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt;

    use claim_geo_application::{
        enrichment::service::{EnrichmentSettings, MapPointsService},
        error::{AppError, AppResult},
        infrastructure_config::Config,
        ports::incoming::{location::ResolveLocationUseCase, report::ReportQueryUseCase},
        report::service::{CacheStatus, ReportOutcome},
    };
    use domain::{
        location::{LocationKey, ResolvedPoint, Tier},
        point::Point,
        report::ReportKey,
    };

    use super::*;

    struct FixedResolver {
        cleared: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ResolveLocationUseCase for FixedResolver {
        async fn resolve(&self, key: &LocationKey) -> ResolvedPoint {
            match key.district() {
                Some(_) => ResolvedPoint::new(Point::unchecked(85.9, 20.5), Tier::District),
                None => ResolvedPoint::new(Point::unchecked(78.9629, 20.5937), Tier::GlobalDefault),
            }
        }

        fn clear_cache(&self) {
            self.cleared.fetch_add(1, Ordering::SeqCst);
        }

        fn cached_entries(&self) -> usize {
            3
        }
    }

    /// Replays a scripted outcome and remembers the last `no_cache` flag.
    struct ScriptedReports {
        outcome: fn() -> AppResult<ReportOutcome>,
        last_no_cache: Mutex<Option<bool>>,
    }

    #[async_trait::async_trait]
    impl ReportQueryUseCase for ScriptedReports {
        async fn get_report(&self, _key: &ReportKey, no_cache: bool) -> AppResult<ReportOutcome> {
            *self
                .last_no_cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(no_cache);
            (self.outcome)()
        }

        fn cached_entries(&self) -> usize {
            1
        }
    }

    fn json_hit() -> AppResult<ReportOutcome> {
        Ok(ReportOutcome {
            url: "http://reports.test/report?state=Odisha".to_string(),
            status_code: 200,
            content_type: "application/json; charset=utf-8".to_string(),
            body: r#"{"claims":12}"#.to_string(),
            is_json: true,
            cache_status: CacheStatus::Hit,
        })
    }

    fn html_miss() -> AppResult<ReportOutcome> {
        Ok(ReportOutcome {
            url: "http://reports.test/report?state=Goa".to_string(),
            status_code: 200,
            content_type: "text/html".to_string(),
            body: "<h1>Goa</h1>".to_string(),
            is_json: false,
            cache_status: CacheStatus::Miss,
        })
    }

    fn timed_out() -> AppResult<ReportOutcome> {
        Err(AppError::UpstreamTimeout { timeout_ms: 15_000 })
    }

    fn failed() -> AppResult<ReportOutcome> {
        Err(AppError::UpstreamError {
            message: "connection refused".to_string(),
        })
    }

    struct Harness {
        router: Router,
        resolver: Arc<FixedResolver>,
        reports: Arc<ScriptedReports>,
    }

    fn harness(outcome: fn() -> AppResult<ReportOutcome>) -> Harness {
        let resolver = Arc::new(FixedResolver {
            cleared: AtomicUsize::new(0),
        });
        let reports = Arc::new(ScriptedReports {
            outcome,
            last_no_cache: Mutex::new(None),
        });
        let map_points = MapPointsService::new(
            Arc::clone(&resolver) as Arc<dyn ResolveLocationUseCase>,
            EnrichmentSettings {
                concurrency: 4,
                max_records: 2000,
            },
        );

        let state = AppState {
            config: Arc::new(Config::default()),
            resolve_location_service: Arc::clone(&resolver) as Arc<dyn ResolveLocationUseCase>,
            map_points_service: Arc::new(map_points),
            report_service: Arc::clone(&reports) as Arc<dyn ReportQueryUseCase>,
        };

        Harness {
            router: build_application_router().with_state(state),
            resolver,
            reports,
        }
    }

    async fn send(router: Router, request: Request<Body>) -> Response {
        router.oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn resolve_returns_point_with_tier() {
        let h = harness(json_hit);
        let response = send(
            h.router,
            get("/geocode/resolve?state=Odisha&district=Cuttack&village=Unknown%20Village"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body, json!({"ok": true, "data": {"lon": 85.9, "lat": 20.5, "tier": "district"}}));
    }

    #[tokio::test]
    async fn caller_request_id_is_echoed() {
        let h = harness(json_hit);
        let request = Request::builder()
            .uri("/health")
            .header("X-Request-Id", "req-42")
            .body(Body::empty())
            .unwrap();

        let response = send(h.router, request).await;
        assert_eq!(
            response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("req-42")
        );
        let body = body_json(response).await;
        assert_eq!(body["data"]["resolution_cache_entries"], 3);
        assert_eq!(body["data"]["report_cache_entries"], 1);
    }

    #[tokio::test]
    async fn clearing_the_cache_reports_what_was_dropped() {
        let h = harness(json_hit);
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/geocode/cache")
            .body(Body::empty())
            .unwrap();

        let response = send(h.router, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"ok": true, "data": {"cleared": 3}}));
        assert_eq!(h.resolver.cleared.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn map_points_keeps_order_and_captured_coordinates() {
        let h = harness(json_hit);
        let payload = json!({
            "records": [
                {"id": "a", "state": "Odisha", "district": "Cuttack", "coordinates": [85.8, 20.4]},
                {"id": "b", "state": "Odisha", "district": "Cuttack"},
                {"id": "c", "state": "Odisha"}
            ]
        });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/claims/map-points")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = send(h.router, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"][0]["properties"]["id"], "a");
        assert_eq!(body["features"][0]["geometry"]["coordinates"], json!([85.8, 20.4]));
        assert_eq!(body["features"][1]["properties"]["tier"], "district");
        assert_eq!(body["features"][2]["properties"]["tier"], "global_default");
    }

    #[tokio::test]
    async fn garbage_captured_coordinates_fall_back_to_resolution() {
        let h = harness(json_hit);
        let payload = json!({
            "records": [
                {"id": "a", "state": "Odisha", "district": "Cuttack", "coordinates": [null, null]},
                {"id": "b", "state": "Odisha", "coordinates": ["85.8", "20.4"]},
                {"id": "c", "state": "Odisha", "coordinates": ["n/a", ""]}
            ]
        });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/claims/map-points")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = send(h.router, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        assert_eq!(body["features"][0]["properties"]["tier"], "district");
        assert_eq!(body["features"][1]["geometry"]["coordinates"], json!([85.8, 20.4]));
        assert_eq!(body["features"][1]["properties"]["tier"], Value::Null);
        assert_eq!(body["features"][2]["properties"]["tier"], "global_default");
    }

    #[tokio::test]
    async fn malformed_map_points_body_is_rejected() {
        let h = harness(json_hit);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/claims/map-points")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"records": "nope"}"#))
            .unwrap();

        let response = send(h.router, request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["ok"], false);
    }

    #[tokio::test]
    async fn oversized_map_points_batch_is_rejected() {
        let h = harness(json_hit);
        let records: Vec<Value> = (0..10_001)
            .map(|i| json!({"id": i.to_string(), "state": "Odisha"}))
            .collect();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/claims/map-points")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "records": records }).to_string()))
            .unwrap();

        let response = send(h.router, request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"], 422);
    }

    #[tokio::test]
    async fn report_hit_sets_cache_header_and_merges_url() {
        let h = harness(json_hit);
        let response = send(h.router, get("/report?state=Odisha")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-cache").and_then(|v| v.to_str().ok()),
            Some("HIT")
        );
        assert_eq!(
            response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json; charset=utf-8")
        );
        let body = body_json(response).await;
        assert_eq!(body["claims"], 12);
        assert_eq!(body["url"], "http://reports.test/report?state=Odisha");
        assert_eq!(*h.reports.last_no_cache.lock().unwrap(), Some(false));
    }

    #[tokio::test]
    async fn report_passes_non_json_through() {
        let h = harness(html_miss);
        let response = send(h.router, get("/report?state=Goa&noCache=1")).await;

        assert_eq!(
            response.headers().get("x-cache").and_then(|v| v.to_str().ok()),
            Some("MISS")
        );
        assert_eq!(
            response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/html")
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Goa</h1>");
        assert_eq!(*h.reports.last_no_cache.lock().unwrap(), Some(true));
    }

    #[tokio::test]
    async fn report_without_state_is_bad_request() {
        let h = harness(json_hit);
        let response = send(h.router, get("/report?district=Cuttack&state=%20")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"], 400);
        assert_eq!(*h.reports.last_no_cache.lock().unwrap(), None);
    }

    #[tokio::test]
    async fn report_timeout_is_gateway_timeout() {
        let h = harness(timed_out);
        let response = send(h.router, get("/report?state=Odisha")).await;

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "upstream timeout after 15000ms");
    }

    #[tokio::test]
    async fn report_failure_is_bad_gateway() {
        let h = harness(failed);
        let response = send(h.router, get("/report?state=Odisha")).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"], "connection refused");
    }
}
