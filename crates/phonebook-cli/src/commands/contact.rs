//! Contact command handlers

use std::process::ExitCode;

use anyhow::{bail, Result};

use phonebook_core::{Config, ContactId, FileStorage, Phonebook, RandomUserSource};

use crate::output::{short_id, Output};
use crate::prompt::confirm;

type CliPhonebook<'a> = Phonebook<FileStorage, &'a Output>;

/// Open the phonebook stored under the configured data directory
fn open<'a>(config: &Config, output: &'a Output) -> CliPhonebook<'a> {
    Phonebook::open(FileStorage::new(config.storage_dir()), output)
}

/// Add a contact
pub fn add(config: &Config, name: String, number: String, output: &Output) -> Result<ExitCode> {
    let mut phonebook = open(config, output);

    if phonebook.submit_contact(&name, &number) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// List contacts, optionally filtered by name
pub fn list(config: &Config, filter: Option<String>, output: &Output) -> Result<ExitCode> {
    let mut phonebook = open(config, output);
    if let Some(filter) = filter {
        phonebook.set_filter(filter);
    }

    output.print_contacts(&phonebook.visible_contacts());
    Ok(ExitCode::SUCCESS)
}

/// Delete a contact
pub fn delete(config: &Config, id: String, output: &Output) -> Result<ExitCode> {
    let mut phonebook = open(config, output);
    let id = resolve_contact_id(&phonebook, &id)?;

    if output.should_prompt() {
        if let Some(contact) = phonebook.store().get(&id) {
            println!("Delete contact: {} - {}", short_id(contact), contact.name);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    phonebook.delete_contact(&id);
    Ok(ExitCode::SUCCESS)
}

/// Fill the phonebook with sample contacts
pub async fn randomize(config: &Config, output: &Output) -> Result<ExitCode> {
    let mut phonebook = open(config, output);
    let source = RandomUserSource::new(&config.source_url, config.sample_size);

    output.message(&format!("Fetching sample contacts from {}...", source.url()));
    let summary = phonebook.randomize(&source).await?;

    output.print_import_summary(&summary);
    Ok(ExitCode::SUCCESS)
}

/// Resolve a contact ID (supports full ID or prefix)
fn resolve_contact_id(phonebook: &CliPhonebook<'_>, input: &str) -> Result<ContactId> {
    let store = phonebook.store();

    // Exact match first
    let exact = ContactId::from(input);
    if store.get(&exact).is_some() {
        return Ok(exact);
    }

    let matches = store.find_by_id_prefix(input);
    match matches.len() {
        0 => bail!("No contact found matching: {}", input),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple contacts match '{}':", input);
            for contact in &matches {
                eprintln!("  {} - {}", contact.id, contact.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
