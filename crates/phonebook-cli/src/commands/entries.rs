//! `phonebook list|add|get|update|delete` command implementations

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use phonebook_common::validation::validate_payload;
use phonebook_common::{Entry, EntryPayload};

use crate::api::ApiClient;
use crate::error::{CliError, Result};

/// Print every entry as a table
pub async fn list(client: &ApiClient) -> Result<()> {
    let entries = client.list_entries().await?;

    if entries.is_empty() {
        println!("Phonebook is empty.");
        println!("Run 'phonebook add <name> <number>' to add an entry.");
        return Ok(());
    }

    println!("{}", entries_table(&entries));
    println!("{} entries", entries.len());

    Ok(())
}

/// Add an entry after checking it against the field rules locally
pub async fn add(client: &ApiClient, name: String, number: String) -> Result<()> {
    let payload = checked_payload(name, number)?;

    let entry = client.create_entry(&payload).await?;
    tracing::debug!(id = %entry.id, "Entry created");

    println!("{}", added_message(&entry));

    Ok(())
}

pub async fn get(client: &ApiClient, id: String) -> Result<()> {
    let found = client.get_entry(&id).await?;
    let entry = found.ok_or(CliError::NotFound(id))?;

    println!("{}", entries_table(std::slice::from_ref(&entry)));

    Ok(())
}

pub async fn update(client: &ApiClient, id: String, name: String, number: String) -> Result<()> {
    let payload = checked_payload(name, number)?;

    let updated = client.update_entry(&id, &payload).await?;
    let entry = updated.ok_or(CliError::NotFound(id))?;

    println!("updated {} number {}", entry.name, entry.number);

    Ok(())
}

/// Deleting an unknown id is not an error on the server either
pub async fn delete(client: &ApiClient, id: String) -> Result<()> {
    client.delete_entry(&id).await?;

    println!("deleted entry {}", id);

    Ok(())
}

fn checked_payload(name: String, number: String) -> Result<EntryPayload> {
    let payload = EntryPayload::new(name, number);
    validate_payload(&payload)?;
    Ok(payload)
}

/// Confirmation line printed after a successful add
pub fn added_message(entry: &Entry) -> String {
    format!("added {} number {} to phonebook", entry.name, entry.number)
}

pub fn entries_table(entries: &[Entry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["ID", "Name", "Number"]);

    for entry in entries {
        table.add_row(vec![entry.id.as_str(), entry.name.as_str(), entry.number.as_str()]);
    }

    table
}
