use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spotlight::interests::DEFAULT_AUDIENCE_SIZE;
use spotlight::QualityTier;

#[derive(Parser, Debug)]
#[command(
    name = "spotlight",
    version,
    about = "Meta ad budget estimation and interest lookup"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Settings file (defaults to <config dir>/spotlight/config.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Suggest a budget from audience size and duration
    Estimate {
        #[command(flatten)]
        campaign: CampaignArgs,
    },
    /// Expected results for a fixed total budget
    Reverse {
        #[command(flatten)]
        campaign: CampaignArgs,
        #[arg(long, help = "Total budget in INR")]
        budget: u64,
    },
    /// Look up Meta ad interests for keywords
    Interests {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
    },
    /// Print the effective settings as TOML
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct CampaignArgs {
    #[arg(long, help = "Campaign goal: traffic, leads, sales or other")]
    pub goal: String,
    #[arg(long, default_value_t = DEFAULT_AUDIENCE_SIZE, help = "Target audience size")]
    pub audience: u64,
    #[arg(
        long,
        default_value_t = 1,
        allow_negative_numbers = true,
        help = "Campaign length in days"
    )]
    pub days: i64,
    #[arg(long, default_value_t = QualityTier::Medium, help = "Quality tier: low, medium or high")]
    pub tier: QualityTier,
}
