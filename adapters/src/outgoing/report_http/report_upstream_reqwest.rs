use reqwest::{Client, header::CONTENT_TYPE};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use claim_geo_application::ports::outgoing::report_upstream::{
    ReportUpstreamPort, UpstreamFetchError,
};
use domain::report::{ReportKey, UpstreamReport};

const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

pub struct ReqwestReportUpstream {
    client: Client,
    base_url: Url,
}

impl ReqwestReportUpstream {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    #[must_use]
    pub fn request_url(&self, key: &ReportKey) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().extend_pairs(key.query_pairs());
        url
    }

    async fn send(&self, url: Url) -> Result<UpstreamReport, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body = response.text().await?;

        Ok(UpstreamReport {
            url: url.into(),
            status_code,
            content_type,
            body,
        })
    }
}

#[async_trait::async_trait]
impl ReportUpstreamPort for ReqwestReportUpstream {
    async fn fetch_report(
        &self,
        key: &ReportKey,
        duration: Duration,
    ) -> Result<UpstreamReport, UpstreamFetchError> {
        let url = self.request_url(key);
        debug!("Fetching report from {}", url);

        match timeout(duration, self.send(url)).await {
            Ok(Ok(report)) => Ok(report),
            Ok(Err(e)) => Err(UpstreamFetchError::Failed(e.to_string())),
            Err(_) => Err(UpstreamFetchError::Timeout {
                timeout_ms: duration.as_millis() as u64,
            }),
        }
    }
}
