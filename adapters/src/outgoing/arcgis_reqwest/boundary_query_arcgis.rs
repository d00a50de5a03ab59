//! Boundary lookups against ArcGIS `MapServer`/`FeatureServer` layers.
//!
//! Only the first matching feature's geometry is requested. Any failure
//! (transport, non-2xx, an `error` payload, unparsable geometry) reads as
//! "no match" so the resolver moves on to the next variant.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use claim_geo_application::ports::outgoing::boundary_query::{BoundaryLayer, BoundaryQueryPort};
use domain::geometry::BoundaryGeometry;

#[derive(Debug, Clone)]
pub struct BoundaryEndpoints {
    pub village: String,
    pub district: String,
    pub state: String,
}

#[derive(Debug, Error)]
enum ArcGisError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered HTTP {0}")]
    Status(u16),

    #[error("service error: {0}")]
    Service(String),
}

pub struct ArcGisBoundaryQuery {
    client: Client,
    endpoints: BoundaryEndpoints,
}

impl ArcGisBoundaryQuery {
    pub fn new(endpoints: BoundaryEndpoints, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client, endpoints })
    }

    fn service_url(&self, layer: BoundaryLayer) -> &str {
        match layer {
            BoundaryLayer::Village => &self.endpoints.village,
            BoundaryLayer::District => &self.endpoints.district,
            BoundaryLayer::State => &self.endpoints.state,
        }
    }

    async fn first_geometry(
        &self,
        layer: BoundaryLayer,
        where_clause: &str,
    ) -> Result<Option<Value>, ArcGisError> {
        let url = format!("{}/query", self.service_url(layer).trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("where", where_clause),
                ("outFields", "OBJECTID"),
                ("returnGeometry", "true"),
                ("f", "json"),
                ("resultRecordCount", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ArcGisError::Status(response.status().as_u16()));
        }

        let mut json: Value = response.json().await?;

        if let Some(error) = json.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(ArcGisError::Service(message.to_string()));
        }

        Ok(json.pointer_mut("/features/0/geometry").map(Value::take))
    }
}

#[async_trait::async_trait]
impl BoundaryQueryPort for ArcGisBoundaryQuery {
    async fn query(&self, layer: BoundaryLayer, where_clause: &str) -> Option<BoundaryGeometry> {
        match self.first_geometry(layer, where_clause).await {
            Ok(Some(geometry)) => {
                let parsed = BoundaryGeometry::from_value(&geometry);
                if parsed.is_none() {
                    debug!("{} layer returned unusable geometry", layer);
                }
                parsed
            }
            Ok(None) => None,
            Err(ArcGisError::Transport(e)) if e.is_timeout() => {
                warn!("{} layer timed out", layer);
                None
            }
            Err(e) => {
                debug!("{} layer query failed: {}", layer, e);
                None
            }
        }
    }
}
