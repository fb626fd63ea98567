use std::{fs, path::Path};

use geo::{LineString, Point, Polygon};
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::PipelineOutput;

/// Export a run as three GeoJSON FeatureCollections keyed `parcels`,
/// `beacons` and `roads`, plus the summary counts.
pub fn output_to_geojson(output: &PipelineOutput, config: &Config) -> Value {
    let parcels: Vec<Value> = output.parcels.iter()
        .map(|p| {
            let mut properties = Map::new();
            properties.insert("parcel_id".into(), json!(p.parcel.parcel_id));
            properties.insert("parcel_num".into(), json!(p.parcel_num));
            properties.insert("region_id".into(), json!(p.join.region_id));
            properties.insert("block_id".into(), json!(p.join.block_id));
            properties.insert("area".into(), json!(p.parcel.area));
            properties.insert("data_source".into(), json!(config.data_source));
            properties.insert("status".into(), json!(config.status));
            feature(polygon_to_geojson(&p.parcel.polygon), properties)
        })
        .collect();

    let beacons: Vec<Value> = output.beacons.iter()
        .flat_map(|(parcel_id, beacons)| beacons.iter().map(move |b| {
            let mut properties = Map::new();
            properties.insert("parcel_id".into(), json!(parcel_id));
            properties.insert("beacon_num".into(), json!(b.beacon_num));
            properties.insert("x".into(), json!(b.point.x()));
            properties.insert("y".into(), json!(b.point.y()));
            feature(point_to_geojson(&b.geometry), properties)
        }))
        .collect();

    let roads: Vec<Value> = output.roads.iter()
        .flat_map(|(parcel_id, roads)| roads.iter().map(move |r| {
            let mut properties = Map::new();
            properties.insert("parcel_id".into(), json!(parcel_id));
            properties.insert("offset".into(), json!(r.offset));
            feature(linestring_to_geojson(&r.centerline), properties)
        }))
        .collect();

    let summary = &output.summary;
    json!({
        "crs": format!("EPSG:{}", config.storage_epsg),
        "parcels": collection(parcels),
        "beacons": collection(beacons),
        "roads": collection(roads),
        "summary": {
            "rows": summary.rows,
            "parcels": summary.parcels,
            "beacons": summary.beacons,
            "roads": summary.roads,
            "join_misses": summary.join_misses,
        },
    })
}

/// Write the GeoJSON export of a run to `path`.
pub fn write_output(output: &PipelineOutput, config: &Config, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(&output_to_geojson(output, config))?;
    fs::write(path, bytes)?;
    Ok(())
}

#[inline]
fn feature(geometry: Value, properties: Map<String, Value>) -> Value {
    json!({ "type": "Feature", "geometry": geometry, "properties": properties })
}

#[inline]
fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

fn ring_coords(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

fn polygon_to_geojson(polygon: &Polygon<f64>) -> Value {
    let rings: Vec<Vec<[f64; 2]>> = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_coords)
        .collect();
    json!({ "type": "Polygon", "coordinates": rings })
}

fn linestring_to_geojson(line: &LineString<f64>) -> Value {
    json!({ "type": "LineString", "coordinates": ring_coords(line) })
}

fn point_to_geojson(point: &Point<f64>) -> Value {
    json!({ "type": "Point", "coordinates": [point.x(), point.y()] })
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    #[test]
    fn polygon_rings_are_positions() {
        let poly = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let value = polygon_to_geojson(&poly);
        assert_eq!(value["type"], "Polygon");
        assert_eq!(value["coordinates"][0].as_array().unwrap().len(), 4);
        assert_eq!(value["coordinates"][0][1], json!([1.0, 0.0]));
    }

    #[test]
    fn point_is_xy_pair() {
        assert_eq!(point_to_geojson(&Point::new(3.0, 4.0))["coordinates"], json!([3.0, 4.0]));
    }
}
