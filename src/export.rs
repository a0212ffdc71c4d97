use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::scrape::Review;

// Overwrites the output path unconditionally
pub fn write_json(reviews: &[Review], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(reviews)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}
