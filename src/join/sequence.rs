use crate::parcel::ParcelPolygon;

use super::JoinResult;

/// A parcel with its administrative identifiers and sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedParcel {
    pub parcel: ParcelPolygon,
    pub join: JoinResult,
    /// 1-based position in input order.
    pub parcel_num: u32,
}

/// Number parcels 1..=N in the order they were closed.
pub fn sequence(parcels: Vec<ParcelPolygon>, joins: Vec<JoinResult>) -> Vec<EnrichedParcel> {
    debug_assert_eq!(parcels.len(), joins.len(), "one join result per parcel");
    parcels.into_iter()
        .zip(joins)
        .zip(1..)
        .map(|((parcel, join), parcel_num)| EnrichedParcel { parcel, join, parcel_num })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    #[test]
    fn numbers_follow_input_order_regardless_of_join() {
        let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].map(|(x, y)| Point::new(x, y));
        let parcels: Vec<_> = ["C", "A", "B"].iter()
            .map(|id| ParcelPolygon::close(id, &square, None).unwrap())
            .collect();
        let joins = vec![
            JoinResult { region_id: 999, region_name: None, block_id: 999 },
            JoinResult { region_id: 1, region_name: None, block_id: 4 },
            JoinResult { region_id: 999, region_name: None, block_id: 2 },
        ];

        let enriched = sequence(parcels, joins);
        assert_eq!(enriched.iter().map(|p| p.parcel_num).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(enriched.iter().map(|p| p.parcel.parcel_id.as_str()).collect::<Vec<_>>(), ["C", "A", "B"]);
        assert_eq!(enriched[1].join.block_id, 4);
    }

    #[test]
    fn no_parcels_no_numbers() {
        assert!(sequence(vec![], vec![]).is_empty());
    }
}
