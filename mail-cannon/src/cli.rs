use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mail-cannon",
    version,
    about = "Batch-create Theseus warehouse orders from a CSV."
)]
pub struct Cli {
    #[arg(help = "Path to the orders CSV file")]
    pub csv: PathBuf,
    #[arg(
        long,
        default_value = "config.json",
        help = "Path to the config file (default: ./config.json)"
    )]
    pub config: PathBuf,
    #[arg(
        long,
        default_value_t = false,
        help = "Validate and log payloads without sending any requests"
    )]
    pub dry_run: bool,
    #[arg(
        long,
        default_value = "logs",
        help = "Directory for the run log and results file"
    )]
    pub log_dir: PathBuf,
}
