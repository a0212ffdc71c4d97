use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;

use crate::site::Source;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Parser, Debug)]
#[command(
    name = "saas_review_scraper",
    version,
    about = "Scrape SaaS customer reviews into a JSON file",
    long_about = None
)]
pub struct Cli {
    /// Company name, used to build listing URLs
    #[arg(long)]
    pub company: String,

    /// Review site to scrape
    #[arg(long, value_enum)]
    pub source: Source,

    /// Inclusive window start, YYYY-MM-DD
    #[arg(long = "start_date")]
    pub start_date: String,

    /// Inclusive window end, YYYY-MM-DD
    #[arg(long = "end_date")]
    pub end_date: String,

    /// Output file path
    #[arg(long, default_value = "reviews.json")]
    pub output: PathBuf,

    /// Override the review site's base URL (hidden; tests only)
    #[arg(long = "base-url", hide = true)]
    pub base_url: Option<String>,
}

/// Inclusive date range a review must fall into.
#[derive(Copy, Clone, Debug)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Validated scrape parameters, consumed read-only by the driver.
#[derive(Debug)]
pub struct ScrapeRequest {
    pub company: String,
    pub source: Source,
    pub window: DateWindow,
    pub output: PathBuf,
    pub base_url: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<ScrapeRequest> {
    let start =
        parse_date(&cli.start_date).context("invalid --start_date, expected YYYY-MM-DD")?;
    let end = parse_date(&cli.end_date).context("invalid --end_date, expected YYYY-MM-DD")?;

    if start > end {
        bail!("--start_date must not be after --end_date");
    }

    Ok(ScrapeRequest {
        company: cli.company,
        source: cli.source,
        window: DateWindow { start, end },
        output: cli.output,
        base_url: cli.base_url,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}
