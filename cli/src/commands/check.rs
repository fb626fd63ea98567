use anyhow::{Context, Result};
use openparcel::io::csv::read_traverse;
use openparcel::{BoundaryLayer, Config, Pipeline, Progress};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::CheckArgs) -> Result<()> {
    let mut config = Config::default();
    if let Some(epsg) = args.epsg { config = config.with_working_epsg(epsg) }

    let records = read_traverse(&args.csv)
        .with_context(|| format!("[check] reading traverse table {}", args.csv.display()))?;

    let pipeline = Pipeline::new(
        config,
        BoundaryLayer::build_index("region", Vec::new()),
        BoundaryLayer::build_index("block", Vec::new()),
    );
    let output = pipeline.run(&records, &Progress::silent()).context("[check] traverse is invalid")?;

    for p in &output.parcels {
        let beacons = output.beacons.get(&p.parcel.parcel_id).map_or(0, <[_]>::len);
        let roads = output.roads.get(&p.parcel.parcel_id).map_or(0, <[_]>::len);
        if cli.verbose > 0 {
            eprintln!("[check] {}: area={:.3} beacons={beacons} roads={roads}", p.parcel.parcel_id, p.parcel.area);
        }
    }
    println!("ok: {} parcels from {} rows", output.summary.parcels, output.summary.rows);

    Ok(())
}
