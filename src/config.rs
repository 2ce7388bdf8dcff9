use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bubble chart of country metrics over a Braille world map")]
pub struct Cli {
    /// JSON array of country records
    #[arg(long, env = "COUNTRY_BUBBLES_DATA", default_value = "data/countries.json")]
    pub data: PathBuf,

    /// Directory holding Natural Earth coastline GeoJSON files
    #[arg(long, env = "COUNTRY_BUBBLES_MAP_DIR", default_value = "data")]
    pub map_dir: PathBuf,

    /// Metric to show first (population, borders, timezones, languages,
    /// region_country_count, region_timezones)
    #[arg(short, long, default_value = "population")]
    pub metric: String,

    /// Print the projected plot points as JSON and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub export: bool,

    /// Log file used while the terminal UI is running
    #[arg(long, default_value = "country-bubbles.log")]
    pub log_file: PathBuf,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// `RUST_LOG` wins; otherwise the level follows the -v count
    pub fn log_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}
