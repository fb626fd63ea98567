//! Spatial enrichment: boundary layer indexes, centroid joins and parcel
//! numbering.
mod enrich;
mod layer;
mod sequence;

pub use enrich::{enrich, JoinMiss, JoinResult, LayerKind};
pub use layer::{BoundaryFeature, BoundaryLayer, BoundaryProvider};
pub use sequence::{sequence, EnrichedParcel};
