use geo::{Area, Centroid, Distance, Euclidean, LineString, Point, Polygon, Validation};

use crate::error::{Error, Result};
use crate::geom::algorithm::{transform_geometry, CoordTransform};

/// Smallest planar area, in squared working units, accepted for a parcel.
const MIN_AREA: f64 = 1e-9;

/// A last point this close to the first, in working units, closes the ring.
const CLOSE_TOLERANCE: f64 = 1e-6;

/// A closed, validated parcel boundary in the storage reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelPolygon {
    pub parcel_id: String,
    /// Exterior ring, first vertex repeated as last.
    pub polygon: Polygon<f64>,
    /// Absolute planar area.
    pub area: f64,
    /// Area centroid, used as the parcel's representative point for joins.
    pub centroid: Point<f64>,
}

impl ParcelPolygon {
    /// Close a ring of resolved points into a validated parcel polygon.
    ///
    /// A traverse that returns to its start lands within rounding of it, so a
    /// last point within `CLOSE_TOLERANCE` of the first is replaced by the
    /// first. The ring must then be simple with positive area. Validation
    /// runs in the working system; area and centroid are measured after
    /// reprojection.
    pub fn close(parcel_id: &str, points: &[Point<f64>], tr: Option<&dyn CoordTransform>) -> Result<Self> {
        let mut points = points.to_vec();
        let returns_to_start = match points.as_slice() {
            [first, .., last] => Euclidean.distance(*first, *last) <= CLOSE_TOLERANCE,
            _ => false,
        };
        if returns_to_start { points.pop(); }
        let mut ring = LineString::from(points);
        ring.close();

        let polygon = Polygon::new(ring, vec![]);
        polygon.check_validation()
            .map_err(|invalid| Error::invalid_geometry(parcel_id, invalid.to_string()))?;
        if polygon.signed_area().abs() <= MIN_AREA {
            return Err(Error::invalid_geometry(parcel_id, "ring has zero area"));
        }

        let polygon = match tr {
            Some(tr) => transform_geometry(tr, &polygon)?,
            None => polygon,
        };

        let area = polygon.unsigned_area();
        let centroid = polygon.centroid()
            .ok_or_else(|| Error::invalid_geometry(parcel_id, "polygon has no centroid"))?;

        Ok(Self { parcel_id: parcel_id.to_string(), polygon, area, centroid })
    }

    /// Number of distinct vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize { self.polygon.exterior().0.len().saturating_sub(1) }
}
