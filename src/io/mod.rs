//! IO module for format-specific reading and writing operations.
//!
//! # Format Modules
//!
//! - `csv` - traverse tables in, parcel lookup table out
//! - `geojson` - boundary layers in, parcels/beacons/roads out

pub mod csv;
pub mod geojson;
