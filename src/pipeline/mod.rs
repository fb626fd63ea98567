//! Drives traverse rows through resolution, closure, offsetting and the
//! spatial join, reporting milestones along the way.
mod output;
mod progress;
mod worker;

use std::time::Instant;

pub use output::{ParcelMap, PipelineOutput, Summary};
pub use progress::Progress;
pub use worker::{spawn, Worker};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geom::algorithm::{transform_for, CoordTransform};
use crate::join::{enrich, sequence, BoundaryLayer, BoundaryProvider};
use crate::parcel::ParcelPolygon;
use crate::traverse::{build_segment, Beacon, ClosedRing, TraverseAccumulator, TraverseRecord};

/// A configured run: settings plus the two indexed boundary layers.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    regions: BoundaryLayer,
    blocks: BoundaryLayer,
}

impl Pipeline {
    pub fn new(config: Config, regions: BoundaryLayer, blocks: BoundaryLayer) -> Self {
        Self { config, regions, blocks }
    }

    /// Load and index both boundary layers before any row is read.
    pub fn from_providers(
        config: Config,
        regions: &dyn BoundaryProvider,
        blocks: &dyn BoundaryProvider,
    ) -> Result<Self> {
        let regions = BoundaryLayer::from_provider("region", regions)?;
        let blocks = BoundaryLayer::from_provider("block", blocks)?;
        Ok(Self::new(config, regions, blocks))
    }

    #[inline] pub fn config(&self) -> &Config { &self.config }

    /// Process the whole table. Any fatal error aborts the run and no partial
    /// output is returned.
    pub fn run(&self, records: &[TraverseRecord], progress: &Progress) -> Result<PipelineOutput> {
        let start = Instant::now();
        let total = records.len();
        if total == 0 { return Err(Error::EmptyInput) }

        let tr = transform_for(&self.config)?;
        let tr = tr.as_ref().map(|t| t as &dyn CoordTransform);
        if tr.is_some() {
            progress.emit(format!("Reprojecting EPSG:{} to EPSG:{}", self.config.working_epsg, self.config.storage_epsg));
        }

        progress.emit(format!("Processing {total} rows..."));

        let mut parcels: Vec<ParcelPolygon> = Vec::new();
        let mut beacons = ParcelMap::new();
        let mut roads = ParcelMap::new();

        let mut on_close = |ring: ClosedRing| -> Result<()> {
            let parcel = ParcelPolygon::close(&ring.parcel_id, &ring.points, tr)?;
            tracing::debug!(parcel = %ring.parcel_id, area = parcel.area, "closed parcel");

            let mut segments = Vec::with_capacity(ring.runs.len());
            for run in &ring.runs {
                segments.extend(build_segment(&ring.parcel_id, run, tr)?);
            }
            let emitted = ring.stations.iter()
                .map(|station| Beacon::emit(station, tr))
                .collect::<Result<Vec<_>>>()?;

            beacons.insert(&ring.parcel_id, emitted);
            roads.insert(&ring.parcel_id, segments);
            parcels.push(parcel);
            Ok(())
        };

        let every = self.config.progress_every.max(1);
        let mut accumulator = TraverseAccumulator::new();
        for (i, record) in records.iter().enumerate() {
            accumulator.push(record, &mut on_close)?;

            let done = i + 1;
            if done % every == 0 {
                let percent = done as f64 / total as f64 * 100.0;
                progress.emit(format!("Processing CSV: {percent:.1}% ({done}/{total} rows)"));
            }
        }
        accumulator.finish(&mut on_close)?;

        progress.emit("Performing spatial joins...");
        progress.emit(format!(
            "Joining {} parcels with {} {} and {} {} features",
            parcels.len(), self.regions.len(), self.regions.name(), self.blocks.len(), self.blocks.name(),
        ));
        let (joins, join_misses) = enrich(&parcels, &self.regions, &self.blocks, self.config.sentinel_id);

        let matched = parcels.iter()
            .filter(|p| !join_misses.iter().any(|m| m.parcel_id == p.parcel_id))
            .count();
        progress.emit(format!("Spatial join found {matched} matches out of {} parcels", parcels.len()));
        for miss in &join_misses {
            progress.emit(format!(
                "WARNING: No {} match for parcel {}, using {}",
                miss.layer, miss.parcel_id, self.config.sentinel_id,
            ));
        }

        let parcels = sequence(parcels, joins);
        for p in &parcels {
            progress.emit(format!(
                "Parcel {}: region_id={}, block_id={}, parcel_num={}",
                p.parcel.parcel_id, p.join.region_id, p.join.block_id, p.parcel_num,
            ));
        }

        let summary = Summary {
            rows: total,
            parcels: parcels.len(),
            beacons: beacons.total(),
            roads: roads.total(),
            join_misses: join_misses.len(),
        };
        progress.emit(format!("Processing complete! Total time: {:.1} seconds", start.elapsed().as_secs_f64()));

        Ok(PipelineOutput { parcels, beacons, roads, join_misses, summary })
    }
}

