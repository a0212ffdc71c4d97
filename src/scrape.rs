use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use thiserror::Error;

use crate::cli::ScrapeRequest;
use crate::site::{DateField, SiteSpec, Source};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; ReviewScraper/1.0)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One customer review that fell inside the requested window.
/// Field order is the serialized key order.
#[derive(Debug, Serialize)]
pub struct Review {
    pub title: String,
    pub review: String,
    pub date: String,
    pub source: Source,
}

#[derive(Debug, Error)]
pub enum BlockError {
    #[error("missing {0} element")]
    Missing(&'static str),
    #[error("missing datetime attribute")]
    MissingDateAttr,
    #[error("unparseable date {text:?}: {source}")]
    BadDate {
        text: String,
        source: chrono::ParseError,
    },
}

pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Walk a company's listing pages in order and collect every review whose
/// date falls inside the window.
///
/// Precondition: listings are served newest-first. A block dated before
/// the window start therefore ends the whole scrape, not just the page.
pub async fn fetch_reviews(client: &Client, request: &ScrapeRequest) -> Result<Vec<Review>> {
    let spec = request.source.spec();
    let block_selector = Selector::parse(spec.block).unwrap();
    let base = request.base_url.as_deref().unwrap_or(request.source.base_url());

    let mut reviews = Vec::new();
    let mut page = 1u32;

    loop {
        let url = request.source.page_url(base, &request.company, page);

        // Transport errors and timeouts end pagination like a non-success status
        let response = match client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Fetch failed, stopping: {e}");
                break;
            }
        };

        if !response.status().is_success() {
            break;
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Read failed, stopping: {e}");
                break;
            }
        };

        let document = Html::parse_document(&body);
        let blocks: Vec<ElementRef> = document.select(&block_selector).collect();

        // Pagination exhausted
        if blocks.is_empty() {
            break;
        }

        for block in blocks {
            let (title, text, date) = match extract_block(block, spec) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("Skip {:?} block on page {page}: {e}", request.source);
                    continue;
                }
            };

            // Older than the window start can never reappear on a later page
            if date < request.window.start {
                return Ok(reviews);
            }

            if date <= request.window.end {
                reviews.push(Review {
                    title,
                    review: text,
                    date: date.format("%Y-%m-%d").to_string(),
                    source: request.source,
                });
            }
        }

        page += 1;
    }

    Ok(reviews)
}

fn extract_block(block: ElementRef, spec: &SiteSpec) -> Result<(String, String, NaiveDate), BlockError> {
    let title = select_text(block, spec.title).ok_or(BlockError::Missing("title"))?;
    let text = select_text(block, spec.body).ok_or(BlockError::Missing("body"))?;

    let date = match &spec.date {
        DateField::Attr { selector } => {
            let sel = Selector::parse(selector).unwrap();
            let el = block.select(&sel).next().ok_or(BlockError::Missing("date"))?;
            let attr = el.value().attr("datetime").ok_or(BlockError::MissingDateAttr)?;
            // The attribute may carry a full timestamp; the date is the first 10 chars
            let raw = attr.get(..10).unwrap_or(attr);
            parse_date(raw, "%Y-%m-%d")?
        }
        DateField::Text { selector, format } => {
            let raw = select_text(block, selector).ok_or(BlockError::Missing("date"))?;
            parse_date(&raw, format)?
        }
    };

    Ok((title, text, date))
}

fn parse_date(raw: &str, format: &str) -> Result<NaiveDate, BlockError> {
    NaiveDate::parse_from_str(raw, format).map_err(|e| BlockError::BadDate {
        text: raw.to_string(),
        source: e,
    })
}

fn select_text(block: ElementRef, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).unwrap();
    let el = block.select(&sel).next()?;
    Some(el.text().collect::<String>().trim().to_string())
}
