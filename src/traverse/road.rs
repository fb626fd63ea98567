use std::mem;

use geo::{LineString, Point};

use crate::error::Result;
use crate::geom::algorithm::{offset_curve, transform_geometry, CoordTransform};

/// Points captured between two offset-marked rows, not yet offset.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRun {
    pub offset: f64,
    pub points: Vec<Point<f64>>,
}

/// Offset-run state of an open ring.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RoadState {
    #[default]
    Idle,
    Collecting(RoadRun),
}

impl RoadState {
    /// Feed the point resolved for a row together with the row's offset.
    ///
    /// While collecting, the point extends the current run. A new offset
    /// closes the current run (which ends at this point) and starts another
    /// one here. Returns the closed run, if any.
    pub fn advance(&mut self, point: Point<f64>, offset: Option<f64>) -> Option<RoadRun> {
        if let RoadState::Collecting(run) = self {
            run.points.push(point);
        }

        let offset = offset?;
        let finished = match mem::take(self) {
            RoadState::Collecting(run) => Some(run),
            RoadState::Idle => None,
        };
        *self = RoadState::Collecting(RoadRun { offset, points: vec![point] });
        finished
    }

    /// Close any run in progress at `terminal`, the parcel's start beacon.
    pub fn finish(&mut self, terminal: Point<f64>) -> Option<RoadRun> {
        match mem::take(self) {
            RoadState::Collecting(mut run) => {
                run.points.push(terminal);
                Some(run)
            }
            RoadState::Idle => None,
        }
    }

    #[inline]
    pub fn is_collecting(&self) -> bool { matches!(self, RoadState::Collecting(_)) }
}

/// A road centerline offset from the parcel boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    /// Signed offset distance used to build `centerline`.
    pub offset: f64,
    /// The captured boundary run, in the storage reference system.
    pub run: LineString<f64>,
    /// The run offset by `offset`, mitered at corners.
    pub centerline: LineString<f64>,
}

/// Reproject a run and offset it into a road segment.
///
/// Runs with fewer than two distinct points cannot be offset; they yield
/// `None` and are logged.
pub fn build_segment(parcel_id: &str, run: &RoadRun, tr: Option<&dyn CoordTransform>) -> Result<Option<RoadSegment>> {
    let line = LineString::from(run.points.clone());
    let line = match tr {
        Some(tr) => transform_geometry(tr, &line)?,
        None => line,
    };

    let Some(centerline) = offset_curve(&line, run.offset) else {
        tracing::warn!(parcel = parcel_id, offset = run.offset, "dropping road run with fewer than two distinct points");
        return Ok(None);
    };

    Ok(Some(RoadSegment { offset: run.offset, run: line, centerline }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point<f64> { Point::new(x, y) }

    #[test]
    fn rows_without_offset_stay_idle() {
        let mut state = RoadState::default();
        assert_eq!(state.advance(p(0.0, 0.0), None), None);
        assert!(!state.is_collecting());
        assert_eq!(state.finish(p(0.0, 0.0)), None);
    }

    #[test]
    fn run_collects_until_ring_closes() {
        let mut state = RoadState::default();
        state.advance(p(0.0, 0.0), None);
        assert_eq!(state.advance(p(10.0, 0.0), Some(5.0)), None);
        assert_eq!(state.advance(p(10.0, 10.0), None), None);

        let run = state.finish(p(0.0, 0.0)).unwrap();
        assert_eq!(run.offset, 5.0);
        assert_eq!(run.points, vec![p(10.0, 0.0), p(10.0, 10.0), p(0.0, 0.0)]);
        assert_eq!(state, RoadState::Idle);
    }

    #[test]
    fn new_offset_closes_previous_run_with_previous_value() {
        let mut state = RoadState::default();
        state.advance(p(0.0, 0.0), Some(5.0));
        state.advance(p(10.0, 0.0), None);

        let first = state.advance(p(10.0, 10.0), Some(3.5)).unwrap();
        assert_eq!(first.offset, 5.0);
        assert_eq!(first.points, vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]);

        let second = state.finish(p(0.0, 0.0)).unwrap();
        assert_eq!(second.offset, 3.5);
        assert_eq!(second.points, vec![p(10.0, 10.0), p(0.0, 0.0)]);
    }

    #[test]
    fn segment_is_offset_by_its_distance() {
        let run = RoadRun { offset: 2.0, points: vec![p(0.0, 0.0), p(10.0, 0.0)] };
        let segment = build_segment("P1", &run, None).unwrap().unwrap();
        assert_eq!(segment.offset, 2.0);
        assert_eq!(segment.run, LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]));
        assert_eq!(segment.centerline, LineString::from(vec![(0.0, 2.0), (10.0, 2.0)]));
    }

    #[test]
    fn single_point_run_is_dropped() {
        let run = RoadRun { offset: 2.0, points: vec![p(4.0, 4.0), p(4.0, 4.0)] };
        assert_eq!(build_segment("P1", &run, None).unwrap(), None);
    }
}
