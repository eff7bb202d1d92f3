//! Contacts Command
//!
//! Add, import, list, and view contacts.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use cardwise_core::contact::{TimelineEvent, TimelineKind};
use cardwise_core::{Contact, ContactStore, EngineError, ScalarField, StorageError};

use super::open_engine;
use crate::config::CliConfig;
use crate::display;

/// Optional fields accepted by `add`.
pub struct NewContactFields {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub linkedin: Option<String>,
}

/// Adds a contact and reports likely duplicates already in the book.
pub fn add(config: &CliConfig, name: &str, fields: NewContactFields) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Contact name cannot be empty");
    }

    let mut contact = Contact::new(name.trim());
    contact.set_field(ScalarField::Email, fields.email);
    contact.set_field(ScalarField::Phone, fields.phone);
    contact.set_field(ScalarField::Company, fields.company);
    contact.set_field(ScalarField::Title, fields.title);
    contact.set_field(ScalarField::Linkedin, fields.linkedin);

    let engine = open_engine(config)?;
    engine.store().save_contact(&contact)?;
    display::success(&format!("Added {} ({})", contact.display_name(), contact.id()));

    let matches = engine.find_matches_for(contact.id())?;
    if !matches.is_empty() {
        display::warning(&format!(
            "{} possible duplicate(s) already in your contacts:",
            matches.len()
        ));
        display::display_matches(&engine.contacts()?, &matches);
    }

    Ok(())
}

/// Imports contacts from a JSON array.
///
/// Contacts keep their ids when present; an id already in the book is
/// overwritten.
pub fn import(config: &CliConfig, file: &Path) -> Result<()> {
    let data = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let contacts: Vec<Contact> = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a JSON array of contacts", file.display()))?;

    let storage = config.open_storage()?;
    for contact in &contacts {
        storage.save_contact(contact)?;
    }

    display::success(&format!("Imported {} contact(s)", contacts.len()));
    println!("  Run 'cardwise dupes' to look for duplicates.");

    Ok(())
}

/// Lists all contacts.
pub fn list(config: &CliConfig) -> Result<()> {
    let storage = config.open_storage()?;
    let contacts = storage.load_all_contacts()?;

    if contacts.is_empty() {
        display::info("No contacts yet. Add one using:");
        println!("  cardwise add <name> --email <email>");
        return Ok(());
    }

    println!();
    println!("Contacts ({}):", contacts.len());
    println!();

    display::display_contacts_table(&contacts);

    println!();

    Ok(())
}

/// Shows details for a specific contact.
pub fn show(config: &CliConfig, id: &str) -> Result<()> {
    let engine = open_engine(config)?;

    let Some(contact) = engine.store().load_contact(id)? else {
        bail!("Contact '{}' not found", id);
    };
    display::display_contact_details(&contact);

    let matches = engine.find_matches_for(id)?;
    if !matches.is_empty() {
        println!("Possible duplicates:");
        display::display_matches(&engine.contacts()?, &matches);
    }

    Ok(())
}

/// Adds a note to a contact's timeline.
pub fn note(config: &CliConfig, id: &str, text: &str) -> Result<()> {
    let mut engine = open_engine(config)?;

    match engine.append_timeline_event(id, TimelineEvent::new(TimelineKind::Note, text)) {
        Ok(()) => {
            display::success("Note added");
            Ok(())
        }
        Err(EngineError::Storage(StorageError::NotFound(_))) => {
            bail!("Contact '{}' not found", id)
        }
        Err(e) => Err(e.into()),
    }
}
