use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// WGS84 coordinate in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    /// Builds a point that must be finite and inside the lon/lat ranges.
    pub fn new(lon: f64, lat: f64) -> DomainResult<Self> {
        let point = Self { lon, lat };
        point.validate()?;
        Ok(point)
    }

    /// Builds a point without range checks. Used for constant tables and
    /// for raw centroid output that the caller validates separately.
    #[must_use]
    pub const fn unchecked(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(DomainError::InvalidCoordinates(format!(
                "Coordinates must be finite, got ({}, {})",
                self.lon, self.lat
            )));
        }

        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(DomainError::InvalidCoordinates(format!(
                "Longitude {} outside [-180, 180]",
                self.lon
            )));
        }

        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(DomainError::InvalidCoordinates(format!(
                "Latitude {} outside [-90, 90]",
                self.lat
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Reads a `[lon, lat, ..]` pair, returning `None` when it is not a
    /// usable map coordinate.
    #[must_use]
    pub fn from_pair(coords: &[f64]) -> Option<Self> {
        match coords {
            [lon, lat, ..] => Self::new(*lon, *lat).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_pair(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}
