pub mod schema;
pub mod session_store;

use crate::error::AppError;
use rusqlite::Connection;
use std::path::PathBuf;

/// Directory holding the session database and `contest.toml`
pub fn get_data_directory() -> PathBuf {
    PathBuf::from("./data")
}

/// Returns the path of the local database
pub fn get_database_path() -> PathBuf {
    get_data_directory().join("photo_contest.db")
}

/// Opens the local database and makes sure the schema exists
pub fn init_database() -> Result<Connection, AppError> {
    let db_path = get_database_path();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(&db_path)?;
    schema::init_schema(&conn)?;

    Ok(conn)
}
