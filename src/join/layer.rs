use geo::{BoundingRect, Intersects, MultiPolygon, Point};
use rstar::{RTree, AABB};

use crate::error::{Error, Result};
use crate::geom::BoundingBox;

/// One administrative boundary polygon with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub id: i64,
    pub name: Option<String>,
    pub polygon: MultiPolygon<f64>,
}

/// Source of boundary features, such as a feature store table or a file.
pub trait BoundaryProvider {
    fn load(&self) -> Result<Vec<BoundaryFeature>>;
}

impl BoundaryProvider for Vec<BoundaryFeature> {
    fn load(&self) -> Result<Vec<BoundaryFeature>> { Ok(self.clone()) }
}

/// A boundary layer indexed for point queries.
///
/// The R-tree is built once and only read afterwards.
#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    name: String,
    features: Vec<BoundaryFeature>,
    rtree: RTree<BoundingBox>,
}

impl BoundaryLayer {
    /// Bulk-load an R-tree over the features' bounding boxes.
    /// Features without a bounding box (empty geometry) can never match.
    pub fn build_index(name: &str, features: Vec<BoundaryFeature>) -> Self {
        Self {
            name: name.to_string(),
            rtree: RTree::bulk_load(features.iter().enumerate()
                .filter_map(|(i, feature)| feature.polygon.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                .collect()),
            features,
        }
    }

    /// Load features from `provider` and index them. Provider failures are
    /// reported as the upstream being unavailable.
    pub fn from_provider(name: &str, provider: &dyn BoundaryProvider) -> Result<Self> {
        let features = provider.load()
            .map_err(|e| Error::UpstreamUnavailable(format!("failed to load {name} layer: {e}")))?;
        tracing::info!(layer = name, features = features.len(), "built boundary index");
        Ok(Self::build_index(name, features))
    }

    /// The feature whose polygon contains or touches `point`.
    ///
    /// When several features match, the one loaded first wins.
    pub fn query_intersecting(&self, point: &Point<f64>) -> Option<&BoundaryFeature> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        self.rtree.locate_in_envelope_intersecting(&envelope)
            .map(|bb| bb.idx())
            .filter(|&i| self.features[i].polygon.intersects(point))
            .min()
            .map(|i| &self.features[i])
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    #[inline] pub fn features(&self) -> &[BoundaryFeature] { &self.features }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    fn square(id: i64, x0: f64, y0: f64, size: f64) -> BoundaryFeature {
        let poly = polygon![
            (x: x0, y: y0), (x: x0 + size, y: y0), (x: x0 + size, y: y0 + size), (x: x0, y: y0 + size),
        ];
        BoundaryFeature { id, name: Some(format!("area {id}")), polygon: MultiPolygon(vec![poly]) }
    }

    #[test]
    fn finds_containing_feature() {
        let layer = BoundaryLayer::build_index("lga", vec![square(1, 0.0, 0.0, 10.0), square(2, 10.0, 0.0, 10.0)]);
        assert_eq!(layer.query_intersecting(&Point::new(15.0, 5.0)).map(|f| f.id), Some(2));
        assert_eq!(layer.query_intersecting(&Point::new(5.0, 5.0)).map(|f| f.id), Some(1));
        assert!(layer.query_intersecting(&Point::new(25.0, 5.0)).is_none());
    }

    #[test]
    fn boundary_point_matches_first_loaded_feature() {
        let layer = BoundaryLayer::build_index("lga", vec![square(7, 10.0, 0.0, 10.0), square(3, 0.0, 0.0, 10.0)]);
        // (10, 5) lies on the shared edge; both intersect, index 0 wins.
        assert_eq!(layer.query_intersecting(&Point::new(10.0, 5.0)).map(|f| f.id), Some(7));
    }

    #[test]
    fn bbox_hit_outside_polygon_is_not_a_match() {
        let triangle = BoundaryFeature {
            id: 9,
            name: None,
            polygon: MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 0.0, y: 10.0)]]),
        };
        let layer = BoundaryLayer::build_index("blocks", vec![triangle]);
        assert!(layer.query_intersecting(&Point::new(9.0, 9.0)).is_none());
        assert_eq!(layer.query_intersecting(&Point::new(1.0, 1.0)).map(|f| f.id), Some(9));
    }

    #[test]
    fn empty_geometry_is_skipped() {
        let empty = BoundaryFeature { id: 1, name: None, polygon: MultiPolygon(vec![]) };
        let layer = BoundaryLayer::build_index("blocks", vec![empty, square(2, 0.0, 0.0, 1.0)]);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.query_intersecting(&Point::new(0.5, 0.5)).map(|f| f.id), Some(2));
    }

    #[test]
    fn failing_provider_is_upstream_unavailable() {
        struct Down;
        impl BoundaryProvider for Down {
            fn load(&self) -> Result<Vec<BoundaryFeature>> {
                Err(Error::Io(std::io::Error::other("connection refused")))
            }
        }
        let err = BoundaryLayer::from_provider("lga", &Down).unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(ref msg) if msg.contains("lga")));
    }
}
