//! Boundary geometry as returned by polygon services, and the vertex-average
//! centroid used to pin records on the map.
//!
//! Two encodings are accepted:
//!
//! * GeoJSON `Polygon` / `MultiPolygon` (`{"type": .., "coordinates": ..}`)
//! * ESRI JSON `{"rings": [..]}` or `{"paths": [..]}`
//!
//! Holes are not told apart from outer rings; every listed vertex counts.

use serde_json::Value;

use crate::point::Point;

pub type Vertex = [f64; 2];
pub type Ring = Vec<Vertex>;

#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    EsriRings(Vec<Ring>),
    EsriPaths(Vec<Ring>),
}

impl BoundaryGeometry {
    /// Parses either encoding. Vertices that are not a pair of finite numbers
    /// are dropped here; an unrecognised shape yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        if let Some(kind) = object.get("type").and_then(Value::as_str) {
            let coordinates = object.get("coordinates")?;
            return match kind {
                "Polygon" => Some(Self::Polygon(parse_rings(coordinates))),
                "MultiPolygon" => Some(Self::MultiPolygon(
                    coordinates
                        .as_array()
                        .map(|polygons| polygons.iter().map(parse_rings).collect())
                        .unwrap_or_default(),
                )),
                _ => None,
            };
        }

        if let Some(rings) = object.get("rings") {
            return Some(Self::EsriRings(parse_rings(rings)));
        }

        object
            .get("paths")
            .map(|paths| Self::EsriPaths(parse_rings(paths)))
    }

    pub fn vertices(&self) -> Box<dyn Iterator<Item = &Vertex> + '_> {
        match self {
            Self::Polygon(rings) | Self::EsriRings(rings) | Self::EsriPaths(rings) => {
                Box::new(rings.iter().flatten())
            }
            Self::MultiPolygon(polygons) => Box::new(polygons.iter().flatten().flatten()),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }
}

/// Arithmetic mean of every vertex. Not area-weighted.
///
/// Returns `None` for geometry without a single usable vertex so the caller
/// picks its own fallback.
#[must_use]
pub fn centroid(geometry: &BoundaryGeometry) -> Option<Point> {
    let mut count = 0_u32;
    let (mut sum_x, mut sum_y) = (0.0_f64, 0.0_f64);

    for [x, y] in geometry.vertices() {
        sum_x += x;
        sum_y += y;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = f64::from(count);
    Some(Point::unchecked(sum_x / n, sum_y / n))
}

#[must_use]
pub fn centroid_of_value(value: Option<&Value>) -> Option<Point> {
    value
        .and_then(BoundaryGeometry::from_value)
        .as_ref()
        .and_then(centroid)
}

fn parse_rings(value: &Value) -> Vec<Ring> {
    value
        .as_array()
        .map(|rings| {
            rings
                .iter()
                .filter_map(Value::as_array)
                .map(|ring| ring.iter().filter_map(parse_vertex).collect())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_vertex(value: &Value) -> Option<Vertex> {
    match value.as_array()?.as_slice() {
        [x, y, ..] => Some([parse_number(x)?, parse_number(y)?]),
        _ => None,
    }
}

pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
