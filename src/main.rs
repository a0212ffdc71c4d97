mod cli;
mod export;
mod scrape;
mod site;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Validate everything before touching the network
    let request = cli::normalize(args)?;

    let client = scrape::build_client()?;
    let reviews = scrape::fetch_reviews(&client, &request).await?;

    export::write_json(&reviews, &request.output)?;

    println!("Scraped {} reviews → {}", reviews.len(), request.output.display());

    Ok(())
}
