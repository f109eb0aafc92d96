use std::str::FromStr;
use std::time::Duration;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, Pool, Sqlite};
use tracing::debug;

use crate::error::Result;

pub const MEMORY_URL: &str = "sqlite::memory:";

/// Handle to the library store.
///
/// Wraps a pool pinned to a single connection, so every statement runs on
/// the same session and an in-memory store lives as long as the handle.
#[derive(Debug, Clone)]
pub struct DB(Pool<Sqlite>);

pub async fn open(url: &str) -> Result<DB> {
	// foreign keys are declared but not enforced: deleting a book leaves its
	// transactions in place
	let options = SqliteConnectOptions::from_str(url)?
		.create_if_missing(true)
		.foreign_keys(false);

	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.acquire_timeout(Duration::from_secs(3))
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(options).await?;

	let db = DB(pool);
	db.schema().await?;
	debug!(url, "database opened");
	Ok(db)
}

pub async fn open_in_memory() -> Result<DB> {
	open(MEMORY_URL).await
}

impl DB {
	pub fn pool(&self) -> &Pool<Sqlite> {
		&self.0
	}

	pub async fn schema(&self) -> Result<()> {
		self.0.execute(TABLE_SCHEMA).await?;
		Ok(())
	}

	// on Ok returns number of rows edited
	pub async fn exec<'q>(&self, query: Query<'q, Sqlite, SqliteArguments<'q>>) -> Result<u64> {
		Ok(query.execute(&self.0).await?.rows_affected())
	}

	// on Ok returns last insert id
	pub async fn insert<'q>(&self, query: Query<'q, Sqlite, SqliteArguments<'q>>) -> Result<i64> {
		Ok(query.execute(&self.0).await?.last_insert_rowid())
	}

	pub async fn close(&self) {
		self.0.close().await;
	}
}

pub const TABLE_SCHEMA: &str = r#"

CREATE TABLE IF NOT EXISTS books (
	book_id TEXT PRIMARY KEY,
	title TEXT,
	author TEXT,
	status TEXT
);

CREATE TABLE IF NOT EXISTS users (
	user_id INTEGER PRIMARY KEY AUTOINCREMENT,
	username TEXT,
	password TEXT
);

CREATE TABLE IF NOT EXISTS transactions (
	transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
	user_id INTEGER,
	book_id TEXT,
	issue_date TEXT,
	return_date TEXT,
	FOREIGN KEY(user_id) REFERENCES users(user_id),
	FOREIGN KEY(book_id) REFERENCES books(book_id)
);

"#;
