use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scamaware", version, about = "ScamAware report toolkit")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "SCAMAWARE_CONFIG_PATH",
        default_value = "config.json",
        help = "Path to the JSON config file"
    )]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and store a scam report
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Show stored reports in submission order
    List,
    /// Write all stored reports to a CSV file
    Export {
        #[arg(long, help = "Directory for the CSV file (defaults to config, then cwd)")]
        out_dir: Option<PathBuf>,
    },
    /// Score a message for scam likelihood
    Assess {
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}
