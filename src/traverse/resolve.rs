use geo::Point;

use crate::error::{Error, Result};
use crate::geom::algorithm::{decimal_degrees, PolarProject};

use super::TraverseRecord;

/// Turn one traverse row into a point in the working reference system.
///
/// - An absolute X/Y fix is used as given.
/// - A complete polar leg is projected from `prev`.
/// - A row that carries only an offset reuses `prev` unchanged.
///
/// `prev` is `None` on the first row of a parcel, which must be an absolute fix.
pub fn resolve(prev: Option<Point<f64>>, record: &TraverseRecord) -> Result<Point<f64>> {
    if let (Some(x), Some(y)) = (&record.x, &record.y) {
        let x = record.number(x, "XY")?;
        let y = record.number(y, "XY")?;
        return Ok(Point::new(x, y));
    }

    let Some(prev) = prev else {
        return Err(Error::MissingStart { parcel: record.parcel_id.clone() });
    };

    if let (Some(degrees), Some(minutes), Some(distance)) = (&record.degrees, &record.minutes, &record.distance) {
        let bearing = decimal_degrees(
            record.number(degrees, "bearing/distance")?,
            record.number(minutes, "bearing/distance")?,
        );
        let distance = record.number(distance, "bearing/distance")?;
        return Ok(prev.project(distance, bearing));
    }

    if record.is_offset_only() {
        return Ok(prev);
    }

    Err(Error::malformed(&record.parcel_id, &record.beacon_num, "bearing/distance"))
}
