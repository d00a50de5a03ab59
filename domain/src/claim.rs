use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::parse_number;

use crate::location::{LocationKey, ResolvedPoint, Tier};
use crate::point::Point;

/// Claim record as handed over by the record store, reduced to what the map
/// needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: String,
    #[serde(default)]
    pub form_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub submission_date: Option<String>,
    /// `[lon, lat]` as captured on the form, often missing or garbage. Kept
    /// as raw JSON so one bad pair does not reject the whole batch.
    #[serde(default)]
    pub coordinates: Option<Value>,
}

impl ClaimRecord {
    #[must_use]
    pub fn location_key(&self) -> LocationKey {
        LocationKey::new(
            self.state.clone(),
            self.district.clone(),
            self.village.clone(),
        )
    }

    /// The captured coordinate, if it is a usable map point. Numeric strings
    /// are accepted; nulls, blanks and out-of-range values are not.
    #[must_use]
    pub fn captured_point(&self) -> Option<Point> {
        match self.coordinates.as_ref()? {
            Value::Array(pair) => match pair.as_slice() {
                [lon, lat, ..] => Point::from_pair(&[parse_number(lon)?, parse_number(lat)?]),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    #[must_use]
    pub fn new(point: Point) -> Self {
        Self {
            kind: "Point",
            coordinates: point.to_pair(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFeatureProperties {
    pub id: String,
    pub form_type: Option<String>,
    pub status: Option<String>,
    pub state: String,
    pub district: String,
    pub village: String,
    pub address: String,
    pub date: Option<String>,
    /// `None` when the record carried its own coordinate.
    pub tier: Option<Tier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub geometry: PointGeometry,
    pub properties: MapFeatureProperties,
}

impl MapFeature {
    #[must_use]
    pub fn new(record: ClaimRecord, point: Point, tier: Option<Tier>) -> Self {
        Self {
            kind: "Feature",
            geometry: PointGeometry::new(point),
            properties: MapFeatureProperties {
                id: record.id,
                form_type: record.form_type,
                status: record.status,
                state: record.state.unwrap_or_default(),
                district: record.district.unwrap_or_default(),
                village: record.village.unwrap_or_default(),
                address: record.address.unwrap_or_default(),
                date: record.submission_date,
                tier,
            },
        }
    }

    #[must_use]
    pub fn from_resolved(record: ClaimRecord, resolved: ResolvedPoint) -> Self {
        Self::new(record, resolved.point, Some(resolved.tier))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<MapFeature>,
}

impl MapFeatureCollection {
    #[must_use]
    pub fn new(features: Vec<MapFeature>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_coordinates(coordinates: Value) -> ClaimRecord {
        serde_json::from_value(json!({
            "id": "c-1",
            "state": "Odisha",
            "coordinates": coordinates
        }))
        .unwrap()
    }

    #[test]
    fn captured_point_rejects_out_of_range_values() {
        let record = with_coordinates(json!([85.88, 20.46]));
        assert_eq!(record.captured_point(), Some(Point::unchecked(85.88, 20.46)));

        assert_eq!(with_coordinates(json!([0.0, 200.0])).captured_point(), None);
        assert_eq!(with_coordinates(json!([85.88])).captured_point(), None);
        assert_eq!(with_coordinates(Value::Null).captured_point(), None);
    }

    #[test]
    fn garbage_coordinates_still_deserialize_without_a_point() {
        for garbage in [
            json!([null, null]),
            json!(["", ""]),
            json!(["north", "east"]),
            json!({"lon": 85.8}),
            json!("85.8,20.4"),
        ] {
            let record = with_coordinates(garbage.clone());
            assert_eq!(record.id, "c-1");
            assert_eq!(record.captured_point(), None, "{garbage}");
        }
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let record = with_coordinates(json!(["85.8", " 20.4 "]));
        assert_eq!(record.captured_point(), Some(Point::unchecked(85.8, 20.4)));
    }

    #[test]
    fn feature_serializes_as_geojson() {
        let record: ClaimRecord = serde_json::from_value(json!({
            "id": "c-7",
            "formType": "FORM_A",
            "state": "Odisha",
            "district": "Cuttack"
        }))
        .unwrap_or_default();

        let feature = MapFeature::new(record, Point::unchecked(85.9, 20.5), Some(Tier::District));
        let value = serde_json::to_value(MapFeatureCollection::new(vec![feature]))
            .unwrap_or_default();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["geometry"]["type"], "Point");
        assert_eq!(value["features"][0]["geometry"]["coordinates"], json!([85.9, 20.5]));
        assert_eq!(value["features"][0]["properties"]["formType"], "FORM_A");
        assert_eq!(value["features"][0]["properties"]["village"], "");
        assert_eq!(value["features"][0]["properties"]["tier"], "district");
    }
}
