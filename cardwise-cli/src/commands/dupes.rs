//! Duplicate Detection Commands

use anyhow::Result;

use super::open_engine;
use crate::config::CliConfig;
use crate::display;

/// Lists duplicate groups at the configured threshold.
pub fn list(config: &CliConfig, json: bool) -> Result<()> {
    let engine = open_engine(config)?;
    let groups = engine.find_duplicate_groups()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        display::info(&format!(
            "No duplicates found at threshold {}",
            config.threshold
        ));
        return Ok(());
    }

    let contacts = engine.contacts()?;
    println!();
    println!("Duplicate groups ({}):", groups.len());
    for (i, group) in groups.iter().enumerate() {
        display::display_group(&contacts, group, i + 1);
    }
    println!();
    println!("  Merge a pair with: cardwise merge <primary> <secondary>");

    Ok(())
}

/// Scores two contacts and explains the result.
pub fn score(config: &CliConfig, a: &str, b: &str) -> Result<()> {
    let engine = open_engine(config)?;
    let result = engine.score(a, b)?;

    display::display_score(&result, config.threshold);

    Ok(())
}
