use geo::Point;

/// Polar projection on the planar working system.
///
/// Bearings are decimal degrees measured clockwise from grid north, so a
/// bearing of 90 moves along +x and 0 moves along +y.
pub trait PolarProject {
    /// The point `distance` units away along `bearing`.
    fn project(&self, distance: f64, bearing: f64) -> Self;

    /// Bearing from `self` to `other`, normalized into `[0, 360)`.
    fn bearing_to(&self, other: &Self) -> f64;
}

impl PolarProject for Point<f64> {
    #[inline]
    fn project(&self, distance: f64, bearing: f64) -> Self {
        let (sin, cos) = bearing.to_radians().sin_cos();
        Point::new(self.x() + distance * sin, self.y() + distance * cos)
    }

    #[inline]
    fn bearing_to(&self, other: &Self) -> f64 {
        let dx = other.x() - self.x();
        let dy = other.y() - self.y();
        dx.atan2(dy).to_degrees().rem_euclid(360.0)
    }
}

/// Combine a degrees/minutes pair into decimal degrees.
#[inline]
pub fn decimal_degrees(degrees: f64, minutes: f64) -> f64 {
    degrees + minutes / 60.0
}
