use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "croprota",
    version,
    about = "Climate-driven crop rotation advisor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Rainfall table (file path or http(s) URL), overrides config
    #[arg(long, global = true)]
    pub rainfall: Option<String>,

    /// Temperature table (file path or http(s) URL), overrides config
    #[arg(long, global = true)]
    pub temperature: Option<String>,

    /// Crop catalog YAML, overrides config
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Args, Clone)]
pub struct MonthArgs {
    /// Target month (abbreviation, name or 0-11); defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub target: MonthArgs,

    /// Check a single crop id and report why it is or is not recommended
    #[arg(long)]
    pub crop: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ranked crop recommendations for a month
    Recommend(RecommendArgs),
    /// Twelve-month planting and harvest calendar
    Timeline {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Long-window climate overview and score
    Overview(MonthArgs),
    /// Full advisory for a month as JSON
    Advise {
        /// Target month (abbreviation, name or 0-11); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Run interactive setup
    Init,
    /// Validate config, catalog and climate tables
    Check,
}
