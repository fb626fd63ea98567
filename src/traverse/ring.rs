use ahash::AHashSet;
use geo::Point;

use crate::error::{Error, Result};

use super::{resolve, RoadRun, RoadState, Station, TraverseRecord};

/// The parcel currently being accumulated.
#[derive(Debug, Clone)]
pub struct OpenRing {
    parcel_id: String,
    first: Point<f64>,
    last: Point<f64>,
    /// Ring vertices with consecutive repeats dropped.
    points: Vec<Point<f64>>,
    stations: Vec<Station>,
    road: RoadState,
    runs: Vec<RoadRun>,
}

/// A parcel whose rows have all been consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedRing {
    pub parcel_id: String,
    pub points: Vec<Point<f64>>,
    pub stations: Vec<Station>,
    pub runs: Vec<RoadRun>,
}

impl OpenRing {
    fn open(parcel_id: &str, beacon_num: &str, point: Point<f64>, offset: Option<f64>) -> Self {
        let mut ring = Self {
            parcel_id: parcel_id.to_string(),
            first: point,
            last: point,
            points: vec![point],
            stations: Vec::new(),
            road: RoadState::Idle,
            runs: Vec::new(),
        };
        ring.stations.push(Station { beacon_num: beacon_num.to_string(), point });
        ring.road.advance(point, offset);
        ring
    }

    fn push(&mut self, beacon_num: &str, point: Point<f64>, offset: Option<f64>) {
        if point != self.last {
            self.points.push(point);
        }
        self.last = point;
        self.stations.push(Station { beacon_num: beacon_num.to_string(), point });
        if let Some(run) = self.road.advance(point, offset) {
            self.runs.push(run);
        }
    }

    fn close(mut self) -> ClosedRing {
        if let Some(run) = self.road.finish(self.first) {
            self.runs.push(run);
        }
        ClosedRing { parcel_id: self.parcel_id, points: self.points, stations: self.stations, runs: self.runs }
    }

    #[inline] pub fn parcel_id(&self) -> &str { &self.parcel_id }
}

/// Groups consecutive traverse rows into rings, one per parcel.
///
/// Rows must arrive grouped by parcel: a parcel id that reappears after
/// another parcel has started is rejected.
#[derive(Debug, Default)]
pub struct TraverseAccumulator {
    open: Option<OpenRing>,
    closed: AHashSet<String>,
}

impl TraverseAccumulator {
    pub fn new() -> Self { Self::default() }

    /// Consume one row. When the row starts a new parcel, the previous ring is
    /// handed to `on_close` before the new row is resolved.
    pub fn push<F>(&mut self, record: &TraverseRecord, on_close: &mut F) -> Result<()>
    where
        F: FnMut(ClosedRing) -> Result<()>,
    {
        let offset = record.offset_value()?;

        if let Some(ring) = self.open.as_mut().filter(|ring| ring.parcel_id == record.parcel_id) {
            let point = resolve(Some(ring.last), record)?;
            ring.push(&record.beacon_num, point, offset);
            return Ok(());
        }

        if self.closed.contains(&record.parcel_id) {
            return Err(Error::NonContiguousParcel { parcel: record.parcel_id.clone() });
        }

        if let Some(ring) = self.open.take() {
            self.closed.insert(ring.parcel_id.clone());
            on_close(ring.close())?;
        }

        let point = resolve(None, record)?;
        self.open = Some(OpenRing::open(&record.parcel_id, &record.beacon_num, point, offset));
        Ok(())
    }

    /// Close the final ring at end of input.
    pub fn finish<F>(mut self, on_close: &mut F) -> Result<()>
    where
        F: FnMut(ClosedRing) -> Result<()>,
    {
        match self.open.take() {
            Some(ring) => on_close(ring.close()),
            None => Ok(()),
        }
    }

    /// The ring currently accumulating, if any.
    #[inline] pub fn open_ring(&self) -> Option<&OpenRing> { self.open.as_ref() }
}
