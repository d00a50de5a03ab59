use serde::Deserialize;
use validator::{Validate, ValidationError};

use domain::{claim::ClaimRecord, location::LocationKey};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolveQuery {
    pub state: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
}

impl ResolveQuery {
    #[must_use]
    pub fn location_key(self) -> LocationKey {
        LocationKey::new(self.state, self.district, self.village)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReportQuery {
    #[validate(
        required(message = "Missing required parameter: state"),
        custom(function = "validate_not_blank", message = "Missing required parameter: state")
    )]
    pub state: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
    #[serde(rename = "noCache")]
    pub no_cache: Option<String>,
}

impl ReportQuery {
    /// `noCache=1`, `noCache=true` and `noCache=yes` bypass the cache.
    #[must_use]
    pub fn bypass_cache(&self) -> bool {
        self.no_cache.as_deref().is_some_and(|value| {
            let value = value.trim();
            value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MapPointsRequest {
    /// Hard ceiling per request. The configured `max_records` below it
    /// decides how many are actually placed.
    #[serde(default)]
    #[validate(length(max = 10000, message = "At most 10000 records per request"))]
    pub records: Vec<ClaimRecord>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
