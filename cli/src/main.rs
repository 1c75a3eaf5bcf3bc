use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use spotlight::budget::format::{format_audience_size, format_count, format_cpr, format_inr};
use spotlight::interests::{audience_for_estimate, dedup_by_id, find_interests, MetaInterest};
use spotlight::{EstimationResult, QualityTier, Settings};

mod cli;

use cli::{CampaignArgs, Cli, Commands};

#[derive(Serialize)]
struct EstimateReport<'a> {
    goal: &'a str,
    quality_tier: QualityTier,
    audience_size: u64,
    duration_days: i64,
    #[serde(flatten)]
    result: EstimationResult,
}

#[derive(Serialize)]
struct InterestReport {
    interests: Vec<MetaInterest>,
    audience_size: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    spotlight::logging::init(cli.verbose);

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Estimate { campaign } => {
            let result = settings
                .estimator()
                .estimate_budget(
                    &campaign.goal,
                    campaign.audience,
                    campaign.days,
                    campaign.tier,
                )
                .with_context(|| format!("estimating budget for goal '{}'", campaign.goal))?;
            print_estimate(cli.json, "Suggested budget", &campaign, &result)?;
        }
        Commands::Reverse { campaign, budget } => {
            let result = settings
                .estimator()
                .reverse_estimate_from_budget(
                    &campaign.goal,
                    campaign.audience,
                    campaign.days,
                    budget,
                    campaign.tier,
                )
                .with_context(|| format!("estimating results for goal '{}'", campaign.goal))?;
            print_estimate(cli.json, "Budget breakdown", &campaign, &result)?;
        }
        Commands::Interests { keywords } => {
            let interests = match settings
                .interest_client()
                .context("building Graph API client")?
            {
                Some(client) => dedup_by_id(find_interests(&client, &keywords).await),
                None => Vec::new(),
            };
            print_interests(cli.json, interests)?;
        }
        Commands::Config => {
            let rendered = settings.to_toml().context("rendering settings")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}

fn load_settings(explicit: Option<&std::path::Path>) -> Result<Settings> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };

    tracing::debug!(path = ?path, "loading settings");
    Settings::load(path.as_deref()).with_context(|| match &path {
        Some(p) => format!("loading settings from {}", p.display()),
        None => "loading settings".to_string(),
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("spotlight").join("config.toml"))
}

fn print_estimate(
    json: bool,
    title: &str,
    campaign: &CampaignArgs,
    result: &EstimationResult,
) -> Result<()> {
    if json {
        let report = EstimateReport {
            goal: campaign.goal.trim(),
            quality_tier: campaign.tier,
            audience_size: campaign.audience,
            duration_days: campaign.days.max(1),
            result: *result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        title.bold(),
        format!(
            "({}, {} tier, {} day(s))",
            campaign.goal.trim(),
            campaign.tier,
            campaign.days.max(1)
        )
        .dimmed()
    );
    println!("  Total budget:      {}", format_inr(result.total_budget).green().bold());
    println!("  Daily budget:      {}", format_inr(result.daily_budget));
    println!("  Expected results:  {}", format_count(result.expected_actions));
    println!("  Cost per result:   {}", format_cpr(result.cost_per_result));
    Ok(())
}

fn print_interests(json: bool, interests: Vec<MetaInterest>) -> Result<()> {
    let audience_size = audience_for_estimate(&interests);

    if json {
        let report = InterestReport {
            interests,
            audience_size,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if interests.is_empty() {
        println!("{}", "No interests found.".yellow());
    }
    for interest in &interests {
        println!(
            "{} {:>8}  {}",
            format!("{:<40}", interest.name).bold(),
            format_audience_size(interest.audience_size),
            format!("[{}]", interest.search_term).dimmed()
        );
    }
    println!(
        "Audience for estimate: {}",
        format_count(audience_size).cyan()
    );
    Ok(())
}
