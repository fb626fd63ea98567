//! Traverse rows to rings: point resolution, per-parcel accumulation, road
//! offset runs and beacon records.
mod beacon;
mod record;
mod resolve;
mod ring;
mod road;

pub use beacon::{Beacon, Station};
pub use record::{TraverseRecord, TRAVERSE_COLUMNS};
pub use resolve::resolve;
pub use ring::{ClosedRing, OpenRing, TraverseAccumulator};
pub use road::{build_segment, RoadRun, RoadSegment, RoadState};
