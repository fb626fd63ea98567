use geo::{Coord, LineString};

/// Longest allowed miter, as a multiple of the offset distance. Sharper
/// corners are beveled.
pub const MITER_LIMIT: f64 = 2.0;

const EPS: f64 = 1e-12;

/// One-sided parallel offset of an open polyline with mitered corners.
///
/// Positive distances offset to the left of the walking direction, negative
/// to the right. Returns `None` when fewer than two distinct vertices remain.
pub fn offset_curve(line: &LineString<f64>, distance: f64) -> Option<LineString<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::with_capacity(line.0.len());
    for &c in &line.0 {
        if points.last().is_none_or(|&last| !same(last, c)) {
            points.push(c);
        }
    }
    if points.len() < 2 { return None }
    if distance.abs() < EPS { return Some(LineString(points)) }

    // Offset each segment along its left normal.
    let (segments, directions): (Vec<(Coord<f64>, Coord<f64>)>, Vec<Coord<f64>>) = points.windows(2)
        .map(|w| {
            let dir = unit(w[1] - w[0]);
            let shift = Coord { x: -dir.y * distance, y: dir.x * distance };
            ((w[0] + shift, w[1] + shift), dir)
        })
        .unzip();

    let mut raw = Vec::with_capacity(points.len() * 2);
    raw.push(segments[0].0);
    for i in 1..segments.len() {
        push_corner(&mut raw, segments[i - 1], segments[i], directions[i - 1], directions[i], points[i], distance);
    }
    raw.push(segments[segments.len() - 1].1);

    Some(LineString(raw))
}

/// Join two consecutive offset segments meeting at `vertex`.
fn push_corner(
    raw: &mut Vec<Coord<f64>>,
    prev: (Coord<f64>, Coord<f64>),
    next: (Coord<f64>, Coord<f64>),
    prev_dir: Coord<f64>,
    next_dir: Coord<f64>,
    vertex: Coord<f64>,
    distance: f64,
) {
    let turn = cross(prev_dir, next_dir);
    if turn.abs() < EPS {
        if dot(prev_dir, next_dir) > 0.0 {
            // Collinear: the segments already share an endpoint.
            raw.push(prev.1);
        } else {
            raw.push(prev.1);
            raw.push(next.0);
        }
        return;
    }

    let t = cross(next.0 - prev.0, next_dir) / turn;
    let miter = prev.0 + prev_dir * t;
    let miter_len = norm(miter - vertex);

    if miter_len > MITER_LIMIT * distance.abs() {
        raw.push(prev.1);
        raw.push(next.0);
    } else {
        raw.push(miter);
    }
}

#[inline] fn dot(a: Coord<f64>, b: Coord<f64>) -> f64 { a.x * b.x + a.y * b.y }
#[inline] fn cross(a: Coord<f64>, b: Coord<f64>) -> f64 { a.x * b.y - a.y * b.x }
#[inline] fn norm(a: Coord<f64>) -> f64 { a.x.hypot(a.y) }
#[inline] fn same(a: Coord<f64>, b: Coord<f64>) -> bool { norm(a - b) < 1e-9 }

#[inline]
fn unit(a: Coord<f64>) -> Coord<f64> {
    let n = norm(a);
    Coord { x: a.x / n, y: a.y / n }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn coords(line: &LineString<f64>) -> Vec<(f64, f64)> {
        line.coords().map(|c| (c.x, c.y)).collect()
    }

    fn assert_coords(line: &LineString<f64>, expected: &[(f64, f64)]) {
        let got = coords(line);
        assert_eq!(got.len(), expected.len(), "got {got:?}");
        for (g, e) in got.iter().zip(expected) {
            assert_abs_diff_eq!(g.0, e.0, epsilon = 1e-9);
            assert_abs_diff_eq!(g.1, e.1, epsilon = 1e-9);
        }
    }

    #[test]
    fn positive_distance_goes_left() {
        let line = LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]);
        assert_coords(&offset_curve(&line, 5.0).unwrap(), &[(0.0, 5.0), (10.0, 5.0)]);
        assert_coords(&offset_curve(&line, -3.5).unwrap(), &[(0.0, -3.5), (10.0, -3.5)]);
    }

    #[test]
    fn inner_and_outer_corners_are_mitered() {
        let line = LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_coords(&offset_curve(&line, 1.0).unwrap(), &[(0.0, 1.0), (9.0, 1.0), (9.0, 10.0)]);
        assert_coords(&offset_curve(&line, -1.0).unwrap(), &[(0.0, -1.0), (11.0, -1.0), (11.0, 10.0)]);
    }

    #[test]
    fn sharp_corner_is_beveled() {
        // Turning back by ~174 degrees would need a miter far beyond the limit.
        let line = LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (0.0, 1.0)]);
        let out = offset_curve(&line, -1.0).unwrap();
        assert_eq!(out.0.len(), 4);
        assert_abs_diff_eq!(out.0[1].x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out.0[1].y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn collinear_vertices_collapse() {
        let line = LineString::from(vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        assert_coords(&offset_curve(&line, 2.0).unwrap(), &[(0.0, 2.0), (5.0, 2.0), (10.0, 2.0)]);
    }

    #[test]
    fn degenerate_input_yields_nothing() {
        let line = LineString::from(vec![(3.0, 4.0), (3.0, 4.0)]);
        assert!(offset_curve(&line, 5.0).is_none());
        assert!(offset_curve(&LineString::new(vec![]), 5.0).is_none());
    }

    #[test]
    fn repeated_vertices_are_ignored() {
        let line = LineString::from(vec![(0.0, 0.0), (0.0, 0.0), (0.0, 10.0)]);
        assert_coords(&offset_curve(&line, 1.0).unwrap(), &[(-1.0, 0.0), (-1.0, 10.0)]);
    }
}
