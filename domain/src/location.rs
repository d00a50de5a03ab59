use serde::{Deserialize, Serialize};
use std::fmt;

use crate::point::Point;

/// Separator for normalized keys. Never appears in administrative place names.
pub const KEY_SEPARATOR: char = '|';

/// A possibly incomplete administrative address.
///
/// Blank components are treated the same as missing ones, so callers can pass
/// raw form fields straight through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    pub state: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
}

impl LocationKey {
    #[must_use]
    pub fn new(
        state: Option<impl Into<String>>,
        district: Option<impl Into<String>>,
        village: Option<impl Into<String>>,
    ) -> Self {
        Self {
            state: state.map(Into::into),
            district: district.map(Into::into),
            village: village.map(Into::into),
        }
    }

    #[must_use]
    pub fn state(&self) -> Option<&str> {
        non_blank(self.state.as_deref())
    }

    #[must_use]
    pub fn district(&self) -> Option<&str> {
        non_blank(self.district.as_deref())
    }

    #[must_use]
    pub fn village(&self) -> Option<&str> {
        non_blank(self.village.as_deref())
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.state().unwrap_or("-"),
            self.district().unwrap_or("-"),
            self.village().unwrap_or("-")
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Which rung of the resolution ladder produced a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Village,
    District,
    State,
    StaticFallback,
    GlobalDefault,
}

impl Tier {
    /// True when the point came from real boundary geometry.
    #[must_use]
    pub fn is_geocoded(self) -> bool {
        matches!(self, Self::Village | Self::District | Self::State)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Village => "village",
            Self::District => "district",
            Self::State => "state",
            Self::StaticFallback => "static_fallback",
            Self::GlobalDefault => "global_default",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPoint {
    pub point: Point,
    pub tier: Tier,
}

impl ResolvedPoint {
    #[must_use]
    pub fn new(point: Point, tier: Tier) -> Self {
        Self { point, tier }
    }
}

/// Cache key partitioned by tier: `v|state|district|village`,
/// `d|state|district` or `s|state`, each part trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    #[must_use]
    pub fn village(state: &str, district: &str, village: &str) -> Self {
        Self::build("v", &[state, district, village])
    }

    #[must_use]
    pub fn district(state: &str, district: &str) -> Self {
        Self::build("d", &[state, district])
    }

    #[must_use]
    pub fn state(state: &str) -> Self {
        Self::build("s", &[state])
    }

    fn build(tag: &str, parts: &[&str]) -> Self {
        let mut key = String::from(tag);
        for part in parts {
            key.push(KEY_SEPARATOR);
            key.push_str(&normalize_component(part));
        }
        Self(key)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim and case-fold one key component. The separator is stripped so a
/// hostile value cannot collide with another tier's key.
#[must_use]
pub fn normalize_component(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != KEY_SEPARATOR)
        .collect()
}
