use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{AppError, AppResult};

pub const DEFAULT_VILLAGE_SERVICE_URL: &str =
    "https://livingatlas.esri.in/server/rest/services/IAB2024/IAB_Village_2024/MapServer/0";
pub const DEFAULT_DISTRICT_SERVICE_URL: &str = "https://services5.arcgis.com/73n8CSGpSSyHr1T9/arcgis/rest/services/district_boundary/FeatureServer/0";
pub const DEFAULT_STATE_SERVICE_URL: &str = "https://services5.arcgis.com/73n8CSGpSSyHr1T9/arcgis/rest/services/state_boundary/FeatureServer/0";
pub const DEFAULT_REPORT_UPSTREAM_URL: &str =
    "https://fra-report-generator-375005976373.europe-west1.run.app/report";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub boundary: BoundaryServiceConfig,
    pub resolver: ResolverConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
    pub environment: EnvironmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryServiceConfig {
    pub village_service_url: String,
    pub district_service_url: String,
    pub state_service_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub cache_capacity: usize,
    pub enrichment_concurrency: usize,
    pub max_records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub upstream_base_url: String,
    pub ttl_seconds: u64,
    pub timeout_ms: u64,
    pub slow_request_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 4000,
                cors_origin: None,
            },
            boundary: BoundaryServiceConfig {
                village_service_url: DEFAULT_VILLAGE_SERVICE_URL.to_string(),
                district_service_url: DEFAULT_DISTRICT_SERVICE_URL.to_string(),
                state_service_url: DEFAULT_STATE_SERVICE_URL.to_string(),
                request_timeout_ms: 10_000,
            },
            resolver: ResolverConfig {
                cache_capacity: 24,
                enrichment_concurrency: 8,
                max_records: 2000,
            },
            report: ReportConfig {
                upstream_base_url: DEFAULT_REPORT_UPSTREAM_URL.to_string(),
                ttl_seconds: 300,
                timeout_ms: 15_000,
                slow_request_ms: 2_000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
                include_location: false,
            },
            environment: EnvironmentConfig {
                env: "development".to_string(),
            },
        }
    }
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("village_service_url", &self.boundary.village_service_url),
            ("district_service_url", &self.boundary.district_service_url),
            ("state_service_url", &self.boundary.state_service_url),
            ("upstream_base_url", &self.report.upstream_base_url),
        ] {
            Url::parse(value).map_err(|e| AppError::ConfigError {
                message: format!("{name} is not a valid URL ('{value}'): {e}"),
            })?;
        }

        if self.boundary.request_timeout_ms == 0 {
            return Err(AppError::ConfigError {
                message: "boundary request_timeout_ms must be greater than 0".to_string(),
            });
        }

        if self.resolver.cache_capacity == 0 {
            return Err(AppError::ConfigError {
                message: "resolver cache_capacity must be greater than 0".to_string(),
            });
        }

        if !(1..=64).contains(&self.resolver.enrichment_concurrency) {
            return Err(AppError::ConfigError {
                message: "enrichment_concurrency must be between 1 and 64".to_string(),
            });
        }

        if self.resolver.max_records == 0 {
            return Err(AppError::ConfigError {
                message: "resolver max_records must be greater than 0".to_string(),
            });
        }

        if self.report.ttl_seconds == 0 || self.report.timeout_ms == 0 {
            return Err(AppError::ConfigError {
                message: "report ttl_seconds and timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn boundary_request_timeout(&self) -> Duration {
        Duration::from_millis(self.boundary.request_timeout_ms)
    }

    #[must_use]
    pub fn report_ttl(&self) -> Duration {
        Duration::from_secs(self.report.ttl_seconds)
    }

    #[must_use]
    pub fn report_timeout(&self) -> Duration {
        Duration::from_millis(self.report.timeout_ms)
    }

    #[must_use]
    pub fn report_slow_threshold(&self) -> Duration {
        Duration::from_millis(self.report.slow_request_ms)
    }
}
