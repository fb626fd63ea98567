#![doc = "OpenParcel public API"]
pub mod config;
pub mod error;
pub mod geom;
pub mod io;
pub mod join;
pub mod notify;
pub mod parcel;
pub mod pipeline;
pub mod traverse;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use join::{BoundaryFeature, BoundaryLayer, BoundaryProvider, EnrichedParcel, JoinMiss, JoinResult, LayerKind};

#[doc(inline)]
pub use parcel::ParcelPolygon;

#[doc(inline)]
pub use pipeline::{spawn, ParcelMap, Pipeline, PipelineOutput, Progress, Summary, Worker};

#[doc(inline)]
pub use traverse::{Beacon, RoadSegment, TraverseRecord};
