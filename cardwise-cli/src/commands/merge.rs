//! Merge Commands
//!
//! Merge two contacts, undo the latest merge, and show the merge log.

use anyhow::{bail, Result};
use cardwise_core::{FieldChoice, FieldChoices};

use super::open_engine;
use crate::config::CliConfig;
use crate::display;

/// Parses `--keep` arguments into field choices.
///
/// Accepts `field=left`, `field=right`, and `field==value` (an explicit
/// value, which may be empty to clear the field).
pub fn parse_choices(keep: &[String]) -> Result<FieldChoices> {
    let mut choices = FieldChoices::new();
    for arg in keep {
        let Some((field, choice)) = arg.split_once('=') else {
            bail!("Invalid --keep '{}': expected FIELD=left, FIELD=right, or FIELD==VALUE", arg);
        };
        let choice = match choice.strip_prefix('=') {
            Some(value) => FieldChoice::Value(value.to_string()),
            None => match choice {
                "left" | "l" => FieldChoice::Left,
                "right" | "r" => FieldChoice::Right,
                other => bail!(
                    "Invalid choice '{}' for field '{}': use left, right, or =VALUE",
                    other,
                    field
                ),
            },
        };
        choices.set_named(field.trim(), choice)?;
    }
    Ok(choices)
}

/// Merges `secondary` into `primary`.
pub fn merge(
    config: &CliConfig,
    primary: &str,
    secondary: &str,
    keep: &[String],
    dry_run: bool,
) -> Result<()> {
    let mut engine = open_engine(config)?;

    let mut choices = engine.suggest_field_choices(primary, secondary)?;
    for (field, choice) in parse_choices(keep)?.iter() {
        choices.set(*field, choice.clone());
    }

    if dry_run {
        let merged = engine.preview_merge(primary, secondary, &choices)?;
        display::info("Dry run: nothing was saved");
        display::display_contact_details(&merged);
        return Ok(());
    }

    let merged = engine.merge(primary, secondary, &choices)?;
    display::success(&format!(
        "Merged {} into {} ({})",
        secondary,
        merged.display_name(),
        merged.id()
    ));
    println!("  Run 'cardwise undo' to reverse it.");

    Ok(())
}

/// Undoes the most recent merge.
pub fn undo(config: &CliConfig) -> Result<()> {
    let mut engine = open_engine(config)?;

    let Some(entry) = engine.merge_history()?.pop() else {
        display::info("Nothing to undo");
        return Ok(());
    };

    if engine.undo_last_merge()? {
        display::success(&format!(
            "Restored {} and {}",
            entry.primary_snapshot().display_name(),
            entry.consumed_snapshot().display_name()
        ));
    } else {
        display::info("Nothing to undo");
    }

    Ok(())
}

/// Shows the merge history, newest first.
pub fn history(config: &CliConfig) -> Result<()> {
    let engine = open_engine(config)?;
    let mut entries = engine.merge_history()?;

    if entries.is_empty() {
        display::info("No merges recorded");
        return Ok(());
    }

    entries.reverse();
    println!();
    println!("Merge history ({}):", entries.len());
    println!();
    display::display_history_table(&entries);
    println!();

    Ok(())
}
