//! GeoJSON boundary layers in, parcels, beacons and roads out.

mod read;
mod write;

pub use read::*;
pub use write::*;
