use geo::Point;

use crate::error::Result;
use crate::geom::algorithm::CoordTransform;

/// A beacon as read off the traverse, before any reprojection.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub beacon_num: String,
    pub point: Point<f64>,
}

/// A marker record for one resolved point.
#[derive(Debug, Clone, PartialEq)]
pub struct Beacon {
    pub beacon_num: String,
    /// Coordinate in the working reference system.
    pub point: Point<f64>,
    /// Coordinate in the storage reference system.
    pub geometry: Point<f64>,
}

impl Beacon {
    pub fn emit(station: &Station, tr: Option<&dyn CoordTransform>) -> Result<Self> {
        let geometry = match tr {
            Some(tr) => tr.transform(station.point)?,
            None => station.point,
        };
        Ok(Self { beacon_num: station.beacon_num.clone(), point: station.point, geometry })
    }
}
