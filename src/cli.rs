// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ScraperConfig;
use crate::normalizer::summarize;
use crate::report::{render_csv, render_json, render_text};
use crate::types::PageCount;

#[derive(Parser)]
#[command(name = "job-postings")]
#[command(about = "Scrape job postings and summarize their salaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collect listings and print a salary report
    Scrape {
        /// Number of list pages to walk, starting at page 1
        #[arg(short, long, default_value = "1")]
        pages: PageCount,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML configuration file (defaults to ./config.yaml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the site origin
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

pub async fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Scrape {
            pages,
            format,
            output,
            config,
            base_url,
        } => {
            let scraper_config = resolve_config(config.as_deref(), base_url)?;
            check_page_limit(pages, scraper_config.max_pages)?;

            let listings =
                crate::scrape_job_postings(scraper_config, i64::from(pages.get()))
                    .await
                    .context("Failed to scrape job postings")?;
            let summary = summarize(&listings);

            let rendered = match format {
                OutputFormat::Text => render_text(&summary),
                OutputFormat::Json => render_json(&listings, &summary)?,
                OutputFormat::Csv => render_csv(&listings)?,
            };

            match output {
                Some(path) => {
                    tokio::fs::write(&path, rendered)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Report written to {}", path.display());
                }
                None => print!("{}", rendered),
            }
        }
    }

    Ok(())
}

/// Load the configuration and apply the `--base-url` flag on top of it
fn resolve_config(path: Option<&Path>, base_url: Option<String>) -> Result<ScraperConfig> {
    let mut config = ScraperConfig::load(path)?;
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
        config.validate()?;
    }
    Ok(config)
}

fn check_page_limit(pages: PageCount, max_pages: u32) -> Result<()> {
    if pages.get() > max_pages {
        anyhow::bail!(
            "Page count {} exceeds the limit of {} pages",
            pages,
            max_pages
        );
    }
    Ok(())
}
