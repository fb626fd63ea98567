//! CSV writing operations.

use std::{fs::File, path::Path};

use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter}};

use crate::error::Result;
use crate::join::EnrichedParcel;

/// Build the parcel lookup table: one row per parcel with its identifiers.
pub fn parcel_table(parcels: &[EnrichedParcel]) -> Result<DataFrame> {
    let ids: Vec<&str> = parcels.iter().map(|p| p.parcel.parcel_id.as_str()).collect();
    let nums: Vec<u32> = parcels.iter().map(|p| p.parcel_num).collect();
    let regions: Vec<i64> = parcels.iter().map(|p| p.join.region_id).collect();
    let blocks: Vec<i64> = parcels.iter().map(|p| p.join.block_id).collect();
    let areas: Vec<f64> = parcels.iter().map(|p| p.parcel.area).collect();

    Ok(DataFrame::new(vec![
        Column::new("parcel_id".into(), ids),
        Column::new("parcel_num".into(), nums),
        Column::new("region_id".into(), regions),
        Column::new("block_id".into(), blocks),
        Column::new("area".into(), areas),
    ])?)
}

/// Write the parcel lookup table to a CSV file.
pub fn write_parcel_table(parcels: &[EnrichedParcel], path: &Path) -> Result<()> {
    let mut df = parcel_table(parcels)?;
    let file = File::create(path)?;
    CsvWriter::new(file).finish(&mut df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::join::JoinResult;
    use crate::parcel::ParcelPolygon;

    fn enriched(id: &str, num: u32, region: i64) -> EnrichedParcel {
        let square = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)].map(|(x, y)| Point::new(x, y));
        EnrichedParcel {
            parcel: ParcelPolygon::close(id, &square, None).unwrap(),
            join: JoinResult { region_id: region, region_name: None, block_id: 999 },
            parcel_num: num,
        }
    }

    #[test]
    fn one_row_per_parcel() {
        let df = parcel_table(&[enriched("P1", 1, 4), enriched("P2", 2, 999)]).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names().iter().map(|n| n.as_str()).collect::<Vec<_>>(),
            ["parcel_id", "parcel_num", "region_id", "block_id", "area"]);
    }

    #[test]
    fn writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcels.csv");
        write_parcel_table(&[enriched("P1", 1, 4)], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("parcel_id,parcel_num,region_id,block_id,area"));
        assert!(lines.next().is_some_and(|row| row.starts_with("P1,1,4,999,4")));
    }
}
