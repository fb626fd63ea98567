use std::fmt;

use crate::parcel::ParcelPolygon;

use super::BoundaryLayer;

/// Which boundary layer a join ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Region,
    Block,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Region => write!(f, "region"),
            LayerKind::Block => write!(f, "block"),
        }
    }
}

/// Administrative identifiers assigned to one parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinResult {
    pub region_id: i64,
    pub region_name: Option<String>,
    pub block_id: i64,
}

/// A parcel centroid that matched nothing in one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinMiss {
    pub parcel_id: String,
    pub layer: LayerKind,
}

/// Join every parcel centroid against the region and block layers.
///
/// A centroid matches a feature it lies within or on the boundary of. A
/// parcel with no match in a layer gets `sentinel` for that layer and a
/// recorded miss. Results are returned in parcel order.
pub fn enrich(
    parcels: &[ParcelPolygon],
    regions: &BoundaryLayer,
    blocks: &BoundaryLayer,
    sentinel: i64,
) -> (Vec<JoinResult>, Vec<JoinMiss>) {
    let mut misses = Vec::new();
    let mut miss = |parcel: &ParcelPolygon, layer: LayerKind| {
        tracing::warn!(parcel = %parcel.parcel_id, %layer, "no spatial join match, using sentinel {sentinel}");
        misses.push(JoinMiss { parcel_id: parcel.parcel_id.clone(), layer });
    };

    let results = parcels.iter()
        .map(|parcel| {
            let region = regions.query_intersecting(&parcel.centroid);
            if region.is_none() { miss(parcel, LayerKind::Region) }

            let block = blocks.query_intersecting(&parcel.centroid);
            if block.is_none() { miss(parcel, LayerKind::Block) }

            JoinResult {
                region_id: region.map_or(sentinel, |f| f.id),
                region_name: region.and_then(|f| f.name.clone()),
                block_id: block.map_or(sentinel, |f| f.id),
            }
        })
        .collect();

    (results, misses)
}
