//! Display Helpers
//!
//! Terminal output formatting and styling.

use console::style;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use cardwise_core::{Contact, DuplicateGroup, MergeHistoryEntry, ScalarField, ScoreResult};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn name_of<'a>(contacts: &'a [Contact], id: &str) -> &'a str {
    contacts
        .iter()
        .find(|c| c.id() == id)
        .map(Contact::display_name)
        .unwrap_or("(unknown)")
}

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Company")]
    company: String,
}

/// Displays contacts as a table.
pub fn display_contacts_table(contacts: &[Contact]) {
    let rows: Vec<ContactRow> = contacts
        .iter()
        .map(|c| ContactRow {
            id: c.id().to_string(),
            name: c.display_name().to_string(),
            email: or_dash(c.email()),
            phone: or_dash(c.phone()),
            company: or_dash(c.company()),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Displays a contact with full details.
pub fn display_contact_details(contact: &Contact) {
    println!();
    println!("  {}", style(contact.display_name()).bold().cyan());
    println!("  ID: {}", style(contact.id()).dim());
    println!();

    let fields: Vec<(ScalarField, &str)> = ScalarField::ALL
        .into_iter()
        .filter(|f| *f != ScalarField::Name)
        .filter_map(|f| contact.field(f).map(|v| (f, v)))
        .collect();
    if fields.is_empty() {
        println!("  {}", style("(no fields)").dim());
    } else {
        for (field, value) in fields {
            println!("  {:12} {}", style(field.as_str()).dim(), value);
        }
    }

    if !contact.tasks().is_empty() {
        println!();
        println!("  Tasks:");
        for task in contact.tasks() {
            let mark = if task.done {
                style("✓").green()
            } else {
                style("·").dim()
            };
            println!("    {} {}", mark, task.title);
        }
    }

    if !contact.reminders().is_empty() {
        println!();
        println!("  Reminders:");
        for reminder in contact.reminders() {
            println!("    {} (at {})", reminder.label, reminder.remind_at);
        }
    }

    if !contact.timeline().is_empty() {
        println!();
        println!("  Timeline:");
        for event in contact.timeline() {
            println!(
                "    {:>10}  {:14} {}",
                event.timestamp,
                style(event.kind.as_str()).dim(),
                event.description
            );
        }
    }

    println!();
}

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Score")]
    score: u8,
    #[tabled(rename = "Why")]
    reasons: String,
}

fn describe(result: &ScoreResult) -> String {
    result
        .reasons
        .iter()
        .map(|r| r.description.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Displays scored matches for one contact.
pub fn display_matches(contacts: &[Contact], matches: &[(String, ScoreResult)]) {
    let rows: Vec<MatchRow> = matches
        .iter()
        .map(|(id, result)| MatchRow {
            id: id.clone(),
            name: name_of(contacts, id).to_string(),
            score: result.score,
            reasons: describe(result),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Displays one duplicate group.
pub fn display_group(contacts: &[Contact], group: &DuplicateGroup, index: usize) {
    let reasons: Vec<&str> = group
        .reasons
        .iter()
        .map(|r| r.description.as_str())
        .collect();

    println!();
    println!(
        "  {}. {} {}",
        index,
        style(format!("score {}", group.score)).bold(),
        style(reasons.join(", ")).dim()
    );
    for id in &group.contact_ids {
        let marker = if *id == group.best_pair.0 || *id == group.best_pair.1 {
            style("*").yellow()
        } else {
            style(" ")
        };
        println!("     {} {}  {}", marker, name_of(contacts, id), style(id).dim());
    }
}

/// Displays a pairwise score with its reasons.
pub fn display_score(result: &ScoreResult, threshold: u8) {
    let verdict = if result.is_match(threshold) {
        style("likely duplicates").yellow().bold()
    } else {
        style("not duplicates").green()
    };
    println!("Score: {} ({})", style(result.score).bold(), verdict);

    for reason in &result.reasons {
        println!(
            "  +{:<3} {}",
            reason.contribution,
            reason.description
        );
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Entry")]
    id: String,
    #[tabled(rename = "Merged at")]
    merged_at: u64,
    #[tabled(rename = "Kept")]
    kept: String,
    #[tabled(rename = "Folded in")]
    consumed: String,
}

/// Displays merge history entries as a table.
pub fn display_history_table(entries: &[MergeHistoryEntry]) {
    let rows: Vec<HistoryRow> = entries
        .iter()
        .map(|e| HistoryRow {
            id: e.id().to_string(),
            merged_at: e.merged_at(),
            kept: format!("{} ({})", e.primary_snapshot().display_name(), e.primary_id()),
            consumed: format!(
                "{} ({})",
                e.consumed_snapshot().display_name(),
                e.consumed_id()
            ),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
}
