use std::{fs, path::{Path, PathBuf}};

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::join::{BoundaryFeature, BoundaryProvider};

/// Boundary features stored as a GeoJSON FeatureCollection file.
#[derive(Debug, Clone)]
pub struct GeoJsonProvider {
    pub path: PathBuf,
    /// Integer property holding the feature identifier, e.g. `lga_num`.
    pub id_property: String,
    /// Optional text property holding a display name, e.g. `lga_name`.
    pub name_property: Option<String>,
}

impl GeoJsonProvider {
    pub fn new(path: impl Into<PathBuf>, id_property: &str) -> Self {
        Self { path: path.into(), id_property: id_property.to_string(), name_property: None }
    }

    pub fn with_name_property(mut self, name_property: &str) -> Self {
        self.name_property = Some(name_property.to_string());
        self
    }
}

impl BoundaryProvider for GeoJsonProvider {
    fn load(&self) -> Result<Vec<BoundaryFeature>> {
        read_boundary_file(&self.path, &self.id_property, self.name_property.as_deref())
    }
}

/// Read boundary features from a GeoJSON file.
pub fn read_boundary_file(path: &Path, id_property: &str, name_property: Option<&str>) -> Result<Vec<BoundaryFeature>> {
    let bytes = fs::read(path)?;
    read_boundary_bytes(&bytes, id_property, name_property)
}

/// Read boundary features from GeoJSON bytes.
///
/// Polygon and MultiPolygon features are kept in file order; other geometry
/// types are skipped. Every kept feature must carry an integer `id_property`.
pub fn read_boundary_bytes(bytes: &[u8], id_property: &str, name_property: Option<&str>) -> Result<Vec<BoundaryFeature>> {
    let value: Value = serde_json::from_slice(bytes)?;
    let features = value["features"].as_array()
        .ok_or_else(|| Error::UpstreamUnavailable("GeoJSON has no features array".into()))?;

    let mut out = Vec::with_capacity(features.len());
    for (idx, feature) in features.iter().enumerate() {
        let geometry = &feature["geometry"];
        let polygon = match geometry["type"].as_str() {
            Some("Polygon") => MultiPolygon(vec![parse_polygon_coords(&geometry["coordinates"])?]),
            Some("MultiPolygon") => parse_multipolygon_coords(&geometry["coordinates"])?,
            _ => continue,
        };

        let properties = &feature["properties"];
        let id = properties[id_property].as_i64()
            .or_else(|| properties[id_property].as_str().and_then(|s| s.trim().parse().ok()))
            .ok_or_else(|| Error::UpstreamUnavailable(format!("feature {idx} has no integer '{id_property}' property")))?;
        let name = name_property
            .and_then(|key| properties[key].as_str())
            .map(str::to_string);

        out.push(BoundaryFeature { id, name, polygon });
    }
    Ok(out)
}

/// Parse GeoJSON MultiPolygon coordinates: `[[ring, ring, ...], ...]`.
fn parse_multipolygon_coords(coords: &Value) -> Result<MultiPolygon<f64>> {
    let polygons = coords.as_array()
        .ok_or_else(|| invalid("MultiPolygon coordinates must be an array"))?;
    polygons.iter().map(parse_polygon_coords).collect::<Result<Vec<_>>>().map(MultiPolygon)
}

/// Parse GeoJSON Polygon coordinates: exterior ring followed by holes.
fn parse_polygon_coords(coords: &Value) -> Result<Polygon<f64>> {
    let rings = coords.as_array()
        .ok_or_else(|| invalid("Polygon coordinates must be an array"))?;
    let mut rings = rings.iter().map(parse_ring_coords);
    let exterior = rings.next()
        .ok_or_else(|| invalid("Polygon is missing its exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring `[[x, y], ...]`, closing it if needed.
fn parse_ring_coords(coords: &Value) -> Result<LineString<f64>> {
    let positions = coords.as_array()
        .ok_or_else(|| invalid("ring must be an array of positions"))?;

    let mut points = Vec::with_capacity(positions.len() + 1);
    for position in positions {
        let x = position[0].as_f64().ok_or_else(|| invalid("coordinate x must be a number"))?;
        let y = position[1].as_f64().ok_or_else(|| invalid("coordinate y must be a number"))?;
        points.push(Coord { x, y });
    }

    let mut ring = LineString(points);
    ring.close();
    Ok(ring)
}

#[inline]
fn invalid(reason: &str) -> Error {
    Error::UpstreamUnavailable(format!("invalid GeoJSON geometry: {reason}"))
}

#[cfg(test)]
mod tests {
    use geo::Area;

    use super::*;

    const LAYER: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"lga_num": 4, "lga_name": "Abeokuta South"},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10]]]}},
            {"type": "Feature", "properties": {"lga_num": "7"},
             "geometry": {"type": "MultiPolygon", "coordinates": [[[[20, 0], [30, 0], [30, 10], [20, 0]]]]}},
            {"type": "Feature", "properties": {"lga_num": 9},
             "geometry": {"type": "Point", "coordinates": [1, 1]}}
        ]
    }"#;

    #[test]
    fn reads_polygons_and_multipolygons() {
        let features = read_boundary_bytes(LAYER.as_bytes(), "lga_num", Some("lga_name")).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id, 4);
        assert_eq!(features[0].name.as_deref(), Some("Abeokuta South"));
        assert_eq!(features[0].polygon.unsigned_area(), 100.0);
        assert_eq!(features[1].id, 7);
        assert_eq!(features[1].name, None);
    }

    #[test]
    fn missing_id_is_an_error() {
        let err = read_boundary_bytes(LAYER.as_bytes(), "block_num", None).unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(ref msg) if msg.contains("block_num")));
    }

    #[test]
    fn provider_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lga.geojson");
        std::fs::write(&path, LAYER).unwrap();

        let provider = GeoJsonProvider::new(&path, "lga_num").with_name_property("lga_name");
        assert_eq!(provider.load().unwrap().len(), 2);
    }

    #[test]
    fn missing_file_fails_to_load() {
        let provider = GeoJsonProvider::new("/nonexistent/lga.geojson", "lga_num");
        assert!(provider.load().is_err());
    }
}
