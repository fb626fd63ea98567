use std::path::PathBuf;

/// Cadastral traverse CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "openparcel", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Resolve a traverse table into enriched parcels, beacons and roads
    Process(ProcessArgs),

    /// Resolve and validate a traverse table without boundary layers
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct ProcessArgs {
    /// Traverse CSV (parcel_id, beacon_num, x, y, degrees, minutes, distance, offset)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub csv: PathBuf,

    /// Region (LGA) boundaries as GeoJSON
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub regions: PathBuf,

    /// Feature property holding the region id
    #[arg(long, default_value = "lga_num")]
    pub region_id_property: String,

    /// Feature property holding the region name
    #[arg(long, default_value = "lga_name")]
    pub region_name_property: String,

    /// Block boundaries as GeoJSON
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub blocks: PathBuf,

    /// Feature property holding the block id
    #[arg(long, default_value = "block_num")]
    pub block_id_property: String,

    /// JSON config file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Working EPSG code of the traverse coordinates, overrides the config
    #[arg(long)]
    pub epsg: Option<u32>,

    /// Output GeoJSON bundle, defaults to "./parcels.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Also write the enriched parcel attributes as CSV
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub table: Option<PathBuf>,

    /// Application number to post a submission notice for
    #[arg(long)]
    pub application: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Traverse CSV to validate
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub csv: PathBuf,

    /// Working EPSG code of the traverse coordinates
    #[arg(long)]
    pub epsg: Option<u32>,
}
