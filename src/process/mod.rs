// src/process/mod.rs

pub mod date_parser;
pub mod records;
pub mod transform;

use std::path::Path;
use tracing::{info, instrument};

use crate::error::Result;
use crate::load::{drop_table, load_table, open_database};
pub use records::{CsvRecord, Customer, Organization};
pub use transform::read_records;

/// Rows written per table by one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub organizations: usize,
    pub customers: usize,
}

/// Transform both CSVs under `dir` and load them into the SQLite file at `db_path`.
///
/// Organizations are loaded completely before customers are read, so a
/// customers failure leaves the organizations table in place. The customers
/// table is dropped before its CSV is read; a missing or malformed
/// customers.csv leaves no stale customers table behind.
#[instrument(level = "info", skip(dir, db_path), fields(dir = %dir.display(), db = %db_path.display()))]
pub fn process_csv_files(dir: &Path, db_path: &Path, batch_size: usize) -> Result<LoadSummary> {
    let conn = open_database(db_path)?;
    let mut summary = LoadSummary::default();

    info!("Processing organizations CSV");
    let organizations: Vec<Organization> = read_records(dir)?;
    summary.organizations = load_table(&conn, &organizations, batch_size)?;
    info!(rows = summary.organizations, "Organizations processing completed!");

    drop_table::<Customer>(&conn)?;
    info!("Processing customers CSV");
    let customers: Vec<Customer> = read_records(dir)?;
    summary.customers = load_table(&conn, &customers, batch_size)?;
    info!(rows = summary.customers, "Customers processing completed!");

    Ok(summary)
}
