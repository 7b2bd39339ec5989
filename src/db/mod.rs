mod records;
pub mod tables;

use std::path::Path;
use std::sync::Arc;

use redb::Database;

use crate::error::Result;

/// Shared handle to the embedded database.
pub type Db = Arc<Database>;

/// Open the database file, creating it and all tables if needed.
pub fn open_database(path: impl AsRef<Path>) -> Result<Db> {
    let path = path.as_ref();
    tracing::info!("Opening database at: {:?}", path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                redb::Error::Io(e)
            })?;
        }
    }

    let db = Database::create(path).map_err(redb::Error::from)?;

    // Make sure every table exists so later read transactions never
    // race table creation.
    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(tables::USERS)?;
        write_txn.open_table(tables::SESSIONS)?;
        write_txn.open_table(tables::RECORDS)?;
    }
    write_txn.commit()?;

    Ok(Arc::new(db))
}
