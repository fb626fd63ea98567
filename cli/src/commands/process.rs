use std::path::PathBuf;

use anyhow::{Context, Result};
use openparcel::io::csv::{read_traverse, write_parcel_table};
use openparcel::io::geojson::{write_output, GeoJsonProvider};
use openparcel::{spawn, Config, Pipeline};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ProcessArgs) -> Result<()> {
    let out_path: PathBuf = args.output.clone().unwrap_or("./parcels.json".into());

    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("[process] reading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(epsg) = args.epsg { config = config.with_working_epsg(epsg) }

    let regions = GeoJsonProvider::new(&args.regions, &args.region_id_property)
        .with_name_property(&args.region_name_property);
    let blocks = GeoJsonProvider::new(&args.blocks, &args.block_id_property);

    eprintln!("[process] loading boundary layers");
    let pipeline = Pipeline::from_providers(config.clone(), &regions, &blocks)
        .context("[process] loading boundary layers")?;

    let records = read_traverse(&args.csv)
        .with_context(|| format!("[process] reading traverse table {}", args.csv.display()))?;

    let worker = spawn(pipeline, records);
    for message in worker.progress.iter() {
        if cli.verbose > 0 { eprintln!("[process] {message}") }
    }
    let output = worker.wait().context("[process] traverse processing failed")?;

    eprintln!("[process] writing {} parcels to {}", output.parcels.len(), out_path.display());
    write_output(&output, &config, &out_path)
        .with_context(|| format!("[process] writing {}", out_path.display()))?;

    if let Some(table) = &args.table {
        write_parcel_table(&output.parcels, table)
            .with_context(|| format!("[process] writing {}", table.display()))?;
    }

    if let Some(application) = &args.application {
        notify(&config, application, &output)?;
    }

    let s = output.summary;
    println!(
        "{} rows, {} parcels, {} beacons, {} roads, {} join misses",
        s.rows, s.parcels, s.beacons, s.roads, s.join_misses,
    );

    Ok(())
}

#[cfg(feature = "notify")]
fn notify(config: &Config, application: &str, output: &openparcel::PipelineOutput) -> Result<()> {
    use openparcel::notify::{send, SubmissionNotice};

    let Some(endpoint) = &config.notify_endpoint else {
        anyhow::bail!("[process] no notify_endpoint configured for application {application}");
    };
    let Some(notice) = SubmissionNotice::from_output(application, output) else {
        tracing::warn!("no parcels to notify for application {application}");
        return Ok(());
    };
    send(endpoint, &notice).with_context(|| format!("[process] posting notice to {endpoint}"))?;
    eprintln!("[process] notice posted for application {application}");
    Ok(())
}

#[cfg(not(feature = "notify"))]
fn notify(_config: &Config, application: &str, _output: &openparcel::PipelineOutput) -> Result<()> {
    tracing::warn!("built without the notify feature; skipping notice for application {application}");
    Ok(())
}
