use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use palisade::classifier::{ImageClassifier, SightengineClassifier};
use palisade::config::Config;
use palisade::media;
use palisade::verdict::{ScoreNode, Verdict, CONFIDENCE_THRESHOLD, EXCLUDED_KEYS};

/// Palisade: image moderation pipeline for chat-platform bots.
///
/// The bot itself runs through a platform adapter; this CLI exercises the
/// classification pipeline directly, which is useful for validating
/// credentials and the configured model taxonomy before deploying.
#[derive(Parser)]
#[command(name = "palisade", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single image URL and print the verdict
    Check {
        /// The image URL to check
        url: String,

        /// Also dump the raw API response
        #[arg(long)]
        raw: bool,
    },

    /// Show the active configuration (credentials presence, models, endpoint)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("palisade=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { url, raw } => {
            let config = Config::load()?;
            config.require_credentials()?;

            if !media::is_valid_image(&url) {
                println!(
                    "{} not a supported image type ({})",
                    "unable to analyze:".yellow().bold(),
                    media::IMAGE_FILE_TYPES.join(", "),
                );
                return Ok(());
            }

            let classifier = SightengineClassifier::new(
                &config.api_url,
                config.api_user.clone(),
                config.api_secret.clone(),
                &config.models,
            )?;

            println!("Checking {url} against models: {}", config.models.join(", "));
            let classification = classifier.classify(&url).await?;
            let verdict = Verdict::from_classification(classification);

            if raw {
                println!("{}", verdict.classification.audit_json());
            }

            display_scores(&verdict);

            if verdict.inappropriate {
                println!("\nVerdict: {}", "INAPPROPRIATE".red().bold());
            } else {
                println!("\nVerdict: {}", "appropriate".green());
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            println!("{}", "=== Palisade configuration ===".bold());
            println!("  Endpoint:    {}", config.api_url);
            println!("  Models:      {}", config.models.join(", "));
            println!("  Concurrency: {}", config.concurrency);
            println!(
                "  Credentials: {}",
                if config.require_credentials().is_ok() {
                    "configured".green().to_string()
                } else {
                    "missing (set SIGHTENGINE_API_USER / SIGHTENGINE_API_SECRET)"
                        .yellow()
                        .to_string()
                }
            );
        }
    }

    Ok(())
}

/// Print every confidence in the score tree, highlighting the ones at or
/// above the flagging threshold.
fn display_scores(verdict: &Verdict) {
    for (category, node) in &verdict.classification.scores {
        if EXCLUDED_KEYS.contains(&category.as_str()) {
            continue;
        }
        match node {
            ScoreNode::Score(value) => print_score(category, *value),
            ScoreNode::Nested(inner) => {
                println!("  {}", category.dimmed());
                for (sub, sub_node) in inner {
                    if EXCLUDED_KEYS.contains(&sub.as_str()) {
                        continue;
                    }
                    if let ScoreNode::Score(value) = sub_node {
                        print_score(&format!("  {sub}"), *value);
                    }
                }
            }
            ScoreNode::Other(_) => {}
        }
    }
}

fn print_score(label: &str, value: f64) {
    if value >= CONFIDENCE_THRESHOLD {
        println!("  {label:<24} {}", format!("{value:.3}").red().bold());
    } else {
        println!("  {label:<24} {value:.3}");
    }
}
