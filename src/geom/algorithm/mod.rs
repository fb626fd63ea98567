mod offset;
mod polar;
mod proj;

pub use offset::{offset_curve, MITER_LIMIT};
pub use polar::{decimal_degrees, PolarProject};
pub use proj::{transform_for, transform_geometry, CoordTransform, Identity, Proj4Transform};
