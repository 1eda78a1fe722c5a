use clap::{Parser, Subcommand};

use crate::transform::RegionFilter;

const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[derive(Parser, Debug)]
#[command(name = "hospital-dashboard")]
#[command(about = "Hospital and medical center dashboard backend", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard page and its JSON payload over HTTP.
    Serve(ServeArgs),
    /// Run the pipeline once and write the dashboard page to a file.
    Render(RenderArgs),
}

/// Region scope for the pipeline. Matching is exact and case-sensitive
/// against the source columns.
#[derive(clap::Args, Debug, Clone)]
pub struct RegionArgs {
    /// Two-letter state code matched against the charge records' provider state.
    #[arg(long, default_value = "CA")]
    pub provider_state: String,

    /// City name matched against hospital locations and ratings.
    #[arg(long, default_value = "LOS ANGELES")]
    pub city: String,

    /// County name matched against physician records.
    #[arg(long, default_value = "Los Angeles")]
    pub county: String,
}

impl From<RegionArgs> for RegionFilter {
    fn from(args: RegionArgs) -> Self {
        RegionFilter {
            provider_state: args.provider_state,
            city: args.city,
            county: args.county,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Directory holding the five source datasets.
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8787)]
    pub port: u16,

    #[command(flatten)]
    pub region: RegionArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Directory holding the five source datasets.
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Output HTML file.
    #[arg(long, default_value = "dashboard.html")]
    pub output: String,

    #[command(flatten)]
    pub region: RegionArgs,
}
