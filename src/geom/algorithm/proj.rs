use geo::{Coord, MapCoords, Point};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::{config::Config, error::{Error, Result}};

/// Opaque reprojection primitive between two reference systems.
pub trait CoordTransform {
    fn transform(&self, point: Point<f64>) -> Result<Point<f64>>;
}

/// Transform every coordinate of a geometry.
pub fn transform_geometry<G>(tr: &dyn CoordTransform, geometry: &G) -> Result<G::Output>
where
    G: MapCoords<f64, f64>,
{
    geometry.try_map_coords(|coord: Coord<f64>| tr.transform(coord.into()).map(|p| p.0))
}

/// Leaves points untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordTransform for Identity {
    #[inline]
    fn transform(&self, point: Point<f64>) -> Result<Point<f64>> { Ok(point) }
}

/// PROJ.4 definitions for the reference systems a survey may be submitted in.
fn proj4_string(epsg: u32) -> Option<&'static str> {
    match epsg {
        // Minna / UTM zone 31N
        26331 => Some("+proj=utm +zone=31 +ellps=clrk80 +towgs84=-92,-93,122,0,0,0,0 +units=m +no_defs +type=crs"),
        // Minna / UTM zone 32N
        26332 => Some("+proj=utm +zone=32 +ellps=clrk80 +towgs84=-92,-93,122,0,0,0,0 +units=m +no_defs +type=crs"),
        // Minna / Nigeria West Belt
        26391 => Some("+proj=tmerc +lat_0=4 +lon_0=4.5 +k=0.99975 +x_0=230738.26 +y_0=0 +ellps=clrk80 +towgs84=-92,-93,122,0,0,0,0 +units=m +no_defs +type=crs"),
        // WGS 84 / UTM zone 31N
        32631 => Some("+proj=utm +zone=31 +datum=WGS84 +units=m +no_defs +type=crs"),
        // WGS 84 lon/lat
        4326 => Some("+proj=longlat +datum=WGS84 +no_defs +type=crs"),
        _ => None,
    }
}

#[inline]
fn is_geographic(epsg: u32) -> bool { epsg == 4326 }

/// Reprojection backed by proj4rs, built from a pair of EPSG codes.
pub struct Proj4Transform {
    from: Proj4,
    to: Proj4,
    from_geographic: bool,
    to_geographic: bool,
}

impl Proj4Transform {
    pub fn new(from_epsg: u32, to_epsg: u32) -> Result<Self> {
        let build = |epsg: u32| -> Result<Proj4> {
            let proj_string = proj4_string(epsg)
                .ok_or_else(|| Error::Transform(format!("unsupported reference system EPSG:{epsg}")))?;
            Proj4::from_proj_string(proj_string)
                .map_err(|e| Error::Transform(format!("failed to build PROJ.4 for EPSG:{epsg}: {e}")))
        };

        Ok(Self {
            from: build(from_epsg)?,
            to: build(to_epsg)?,
            from_geographic: is_geographic(from_epsg),
            to_geographic: is_geographic(to_epsg),
        })
    }
}

impl CoordTransform for Proj4Transform {
    fn transform(&self, point: Point<f64>) -> Result<Point<f64>> {
        // Geographic systems go through proj4rs in radians.
        let mut xyz = if self.from_geographic {
            (point.x().to_radians(), point.y().to_radians(), 0.0)
        } else {
            (point.x(), point.y(), 0.0)
        };

        transform(&self.from, &self.to, &mut xyz)
            .map_err(|e| Error::Transform(format!("({}, {}): {e}", point.x(), point.y())))?;

        Ok(if self.to_geographic {
            Point::new(xyz.0.to_degrees(), xyz.1.to_degrees())
        } else {
            Point::new(xyz.0, xyz.1)
        })
    }
}

/// The transform a run needs, or `None` when points are stored as resolved.
pub fn transform_for(config: &Config) -> Result<Option<Proj4Transform>> {
    if !config.needs_reprojection() { return Ok(None) }
    Proj4Transform::new(config.working_epsg, config.storage_epsg).map(Some)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use geo::LineString;

    use super::*;

    #[test]
    fn identity_is_a_no_op() {
        let p = Point::new(1.5, -2.5);
        assert_eq!(Identity.transform(p).unwrap(), p);
    }

    #[test]
    fn no_transform_for_canonical_system() {
        assert!(transform_for(&Config::default()).unwrap().is_none());
    }

    #[test]
    fn unknown_system_is_an_error() {
        assert!(matches!(Proj4Transform::new(1234, 26331), Err(Error::Transform(_))));
    }

    #[test]
    fn same_datum_round_trip() {
        let there = Proj4Transform::new(26391, 26331).unwrap();
        let back = Proj4Transform::new(26331, 26391).unwrap();

        let p = Point::new(123_456.789, 987_654.321);
        let q = back.transform(there.transform(p).unwrap()).unwrap();
        assert_abs_diff_eq!(p.x(), q.x(), epsilon = 1e-3);
        assert_abs_diff_eq!(p.y(), q.y(), epsilon = 1e-3);
    }

    #[test]
    fn geometry_is_transformed_per_coordinate() {
        struct Shift;
        impl CoordTransform for Shift {
            fn transform(&self, p: Point<f64>) -> Result<Point<f64>> { Ok(Point::new(p.x() + 1.0, p.y())) }
        }

        let line = LineString::from(vec![(0.0, 0.0), (2.0, 0.0)]);
        let moved = transform_geometry(&Shift, &line).unwrap();
        assert_eq!(moved, LineString::from(vec![(1.0, 0.0), (3.0, 0.0)]));
    }
}
