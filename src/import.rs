// CSV client import with file-level idempotency

use crate::person::{Address, Email, Name, Notes, Person, Phone, Tag};
use crate::records::{Asset, Liability, Policy};
use crate::storage::{already_imported, record_import};
use crate::store::ClientStore;
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Separator between multiple records inside one CSV cell; attributes inside
/// a record use the `;;;` delimiter.
const RECORD_SEPARATOR: char = '|';

#[derive(Debug, Deserialize)]
struct ClientRow {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Phone")]
    phone: String,

    #[serde(rename = "Email")]
    email: String,

    #[serde(rename = "Address")]
    address: String,

    #[serde(rename = "Tags", default)]
    tags: String,

    #[serde(rename = "Notes", default)]
    notes: String,

    #[serde(rename = "Policies", default)]
    policies: String,

    #[serde(rename = "Liabilities", default)]
    liabilities: String,

    #[serde(rename = "Assets", default)]
    assets: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Rows added to the store.
    pub imported: usize,
    /// Rows skipped because the name already exists.
    pub duplicates: usize,
    /// True when the whole file was skipped as previously imported.
    pub file_skipped: bool,
}

/// Import clients from a CSV file into the store.
///
/// The file's sha256 fingerprint gates re-imports; rows whose name already
/// exists are skipped. Any invalid row aborts the import with a row-numbered
/// error before the fingerprint is recorded.
pub fn import_clients(
    conn: &Connection,
    store: &mut ClientStore,
    csv_path: &Path,
) -> Result<ImportReport> {
    let bytes = fs::read(csv_path)
        .with_context(|| format!("Failed to read CSV file: {}", csv_path.display()))?;
    let fingerprint = file_sha256(&bytes);

    if already_imported(conn, &fingerprint)? {
        return Ok(ImportReport {
            file_skipped: true,
            ..ImportReport::default()
        });
    }

    let source_file = csv_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.csv")
        .to_string();

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());

    let mut report = ImportReport::default();
    let mut row_count = 0usize;
    for (line_num, result) in rdr.deserialize().enumerate() {
        let row: ClientRow = result.with_context(|| {
            format!("Failed to parse CSV line {} in {}", line_num + 2, source_file)
        })?;
        row_count += 1;

        let person = restore_row(&row).with_context(|| {
            format!("Invalid client on CSV line {} in {}", line_num + 2, source_file)
        })?;

        if store.add(person).is_ok() {
            report.imported += 1;
        } else {
            report.duplicates += 1;
        }
    }

    record_import(conn, &fingerprint, &source_file, row_count)?;
    Ok(report)
}

fn restore_row(row: &ClientRow) -> Result<Person> {
    let mut tags = HashSet::new();
    for word in row.tags.split_whitespace() {
        tags.insert(Tag::new(word)?);
    }

    let mut policies = HashSet::new();
    for cell in split_records(&row.policies) {
        policies.insert(Policy::from_attribute_string(cell)?);
    }

    let mut liabilities = HashSet::new();
    for cell in split_records(&row.liabilities) {
        liabilities.insert(Liability::from_attribute_string(cell)?);
    }

    let mut assets = HashSet::new();
    for cell in split_records(&row.assets) {
        assets.insert(Asset::from_attribute_string(cell)?);
    }

    Ok(Person::new(
        Name::new(&row.name)?,
        Phone::new(&row.phone)?,
        Email::new(&row.email)?,
        Address::new(&row.address)?,
        tags,
        Notes::new(&row.notes),
        policies,
        liabilities,
        assets,
    ))
}

fn split_records(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(RECORD_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

fn file_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
