// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::env;
use std::path::{Path, PathBuf};

use clientbook::commands::Session;
use clientbook::sample::sample_persons;
use clientbook::store::ClientStore;
use clientbook::{import, storage};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("clientbook=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "import" {
        let csv_path = args
            .get(2)
            .map(PathBuf::from)
            .context("Usage: clientbook import <file.csv>")?;
        run_import(&csv_path)?;
    } else {
        run_ui_mode()?;
    }

    Ok(())
}

fn database_path() -> PathBuf {
    env::var("CLIENTBOOK_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("clientbook.db"))
}

fn open_store(conn: &Connection) -> Result<ClientStore> {
    storage::setup_database(conn)?;
    let mut persons = storage::load_persons(conn)?;
    if persons.is_empty() {
        persons = sample_persons();
    }
    Ok(ClientStore::from_persons(persons))
}

fn run_import(csv_path: &Path) -> Result<()> {
    let db_path = database_path();
    let mut conn = Connection::open(&db_path)?;
    let mut store = open_store(&conn)?;

    println!("Importing clients from {} ...", csv_path.display());
    let report = import::import_clients(&conn, &mut store, csv_path)?;

    if report.file_skipped {
        println!("File already imported; nothing to do.");
        return Ok(());
    }

    storage::save_persons(&mut conn, &store)?;
    println!("Imported {} clients", report.imported);
    if report.duplicates > 0 {
        println!("Skipped {} duplicates", report.duplicates);
    }
    println!("Client list now holds {} clients", store.len());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let db_path = database_path();
    let mut conn = Connection::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    let store = open_store(&conn)?;

    let mut app = ui::App::new(Session::new(store));
    ui::run_ui(&mut app, &mut conn)?;

    // Persist whatever the session ended with.
    storage::save_persons(&mut conn, &app.session.store)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("TUI mode not available!");
    eprintln!("Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
