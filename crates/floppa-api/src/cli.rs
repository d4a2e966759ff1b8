//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use floppa_core::StoreUrl;

/// HTTP gateway serving random animal images.
#[derive(Parser, Debug)]
#[command(name = "floppa-api")]
#[command(author, version = env!("FLOPPA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, env = "FLOPPA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(short, long, env = "FLOPPA_BIND")]
    pub bind: Option<String>,

    /// PocketBase base URL (overrides the config file)
    #[arg(long, env = "FLOPPA_POCKETBASE_URL")]
    pub pocketbase_url: Option<StoreUrl>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}
