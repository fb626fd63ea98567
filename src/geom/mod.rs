//! Planar geometry helpers: polar legs, offset curves and
//! reprojection.
pub mod algorithm;
mod bbox;

pub(crate) use bbox::BoundingBox;
