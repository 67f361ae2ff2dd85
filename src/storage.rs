// SQLite persistence - clients, plus import bookkeeping

use crate::person::{Address, Email, Name, Notes, Person, Phone, Tag};
use crate::records::{Asset, Liability, Policy};
use crate::store::ClientStore;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::collections::HashSet;

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS persons (
            position INTEGER PRIMARY KEY,
            name TEXT UNIQUE NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            tags TEXT NOT NULL,
            notes TEXT NOT NULL,
            policies TEXT NOT NULL,
            liabilities TEXT NOT NULL,
            assets TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS import_files (
            sha256 TEXT PRIMARY KEY,
            source_file TEXT NOT NULL,
            imported_at TEXT NOT NULL,
            row_count INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Persist the whole store, replacing previous contents and preserving list
/// order. One transaction; a failure leaves the previous snapshot intact.
pub fn save_persons(conn: &mut Connection, store: &ClientStore) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM persons", [])?;
    for (position, person) in store.persons().iter().enumerate() {
        let tags: Vec<&str> = {
            let mut tags: Vec<&str> = person.tags().iter().map(Tag::as_str).collect();
            tags.sort_unstable();
            tags
        };
        let policies: Vec<String> = person
            .policies()
            .iter()
            .map(Policy::to_attribute_string)
            .collect();
        let liabilities: Vec<String> = person
            .liabilities()
            .iter()
            .map(Liability::to_attribute_string)
            .collect();
        let assets: Vec<String> = person
            .assets()
            .iter()
            .map(Asset::to_attribute_string)
            .collect();

        tx.execute(
            "INSERT INTO persons (
                position, name, phone, email, address, tags, notes,
                policies, liabilities, assets
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                position as i64,
                person.name().as_str(),
                person.phone().as_str(),
                person.email().as_str(),
                person.address().as_str(),
                serde_json::to_string(&tags)?,
                person.notes().as_str(),
                serde_json::to_string(&policies)?,
                serde_json::to_string(&liabilities)?,
                serde_json::to_string(&assets)?,
            ],
        )?;
    }
    tx.commit()?;
    Ok(())
}

/// Load all persisted clients in stored order.
///
/// Every field re-enters through its domain constructor, so a row that no
/// longer passes validation surfaces as an error instead of a corrupt
/// in-memory person.
pub fn load_persons(conn: &Connection) -> Result<Vec<Person>> {
    let mut stmt = conn.prepare(
        "SELECT name, phone, email, address, tags, notes,
                policies, liabilities, assets
         FROM persons ORDER BY position",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
        ))
    })?;

    let mut persons = Vec::new();
    for row in rows {
        let (name, phone, email, address, tags, notes, policies, liabilities, assets) = row?;
        let person = restore_person(
            &name,
            &phone,
            &email,
            &address,
            &tags,
            &notes,
            &policies,
            &liabilities,
            &assets,
        )
        .with_context(|| format!("stored client '{}' failed validation", name))?;
        persons.push(person);
    }
    Ok(persons)
}

#[allow(clippy::too_many_arguments)]
fn restore_person(
    name: &str,
    phone: &str,
    email: &str,
    address: &str,
    tags_json: &str,
    notes: &str,
    policies_json: &str,
    liabilities_json: &str,
    assets_json: &str,
) -> Result<Person> {
    let tag_words: Vec<String> = serde_json::from_str(tags_json)?;
    let mut tags = HashSet::new();
    for word in &tag_words {
        tags.insert(Tag::new(word)?);
    }

    let policy_strings: Vec<String> = serde_json::from_str(policies_json)?;
    let mut policies = HashSet::new();
    for s in &policy_strings {
        policies.insert(Policy::from_attribute_string(s)?);
    }

    let liability_strings: Vec<String> = serde_json::from_str(liabilities_json)?;
    let mut liabilities = HashSet::new();
    for s in &liability_strings {
        liabilities.insert(Liability::from_attribute_string(s)?);
    }

    let asset_strings: Vec<String> = serde_json::from_str(assets_json)?;
    let mut assets = HashSet::new();
    for s in &asset_strings {
        assets.insert(Asset::from_attribute_string(s)?);
    }

    Ok(Person::new(
        Name::new(name)?,
        Phone::new(phone)?,
        Email::new(email)?,
        Address::new(address)?,
        tags,
        Notes::new(notes),
        policies,
        liabilities,
        assets,
    ))
}

/// Record an imported file's fingerprint.
pub fn record_import(
    conn: &Connection,
    sha256: &str,
    source_file: &str,
    row_count: usize,
) -> Result<()> {
    conn.execute(
        "INSERT INTO import_files (sha256, source_file, imported_at, row_count)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            sha256,
            source_file,
            Utc::now().to_rfc3339(),
            row_count as i64
        ],
    )?;
    Ok(())
}

/// Whether a file with this fingerprint was imported before.
pub fn already_imported(conn: &Connection, sha256: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM import_files WHERE sha256 = ?1",
        params![sha256],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::ContactField;
    use pretty_assertions::assert_eq;

    fn seeded_store() -> ClientStore {
        let mut person = crate::person::tests::person("Alex Yeoh");
        person = person
            .with_field(ContactField::Address, "Blk 30 Geylang Street 29, #06-40")
            .unwrap();
        let mut policies = HashSet::new();
        policies.insert(Policy::new("Diamond Policy", "AIA", "$10000", "$200", "$1000").unwrap());
        person = person.with_policies(policies);

        let mut liabilities = HashSet::new();
        liabilities
            .insert(Liability::new("Mortgage debt", "Debt", "$2000", "From DBS Bank").unwrap());
        person = person.with_liabilities(liabilities);

        let mut store = ClientStore::new();
        store.add(person).unwrap();
        store
            .add(crate::person::tests::person("Bernice Yu"))
            .unwrap();
        store
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        let store = seeded_store();
        save_persons(&mut conn, &store).unwrap();
        let loaded = load_persons(&conn).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded, store.persons().to_vec());
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        save_persons(&mut conn, &seeded_store()).unwrap();
        let mut smaller = ClientStore::new();
        smaller
            .add(crate::person::tests::person("Charlotte Oliveiro"))
            .unwrap();
        save_persons(&mut conn, &smaller).unwrap();

        let loaded = load_persons(&conn).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name().as_str(), "Charlotte Oliveiro");
    }

    #[test]
    fn test_import_fingerprints() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        assert!(!already_imported(&conn, "abc123").unwrap());
        record_import(&conn, "abc123", "clients.csv", 6).unwrap();
        assert!(already_imported(&conn, "abc123").unwrap());
    }
}
