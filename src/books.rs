use tracing::{debug, warn};

use crate::error::Result;
use crate::sql::DB;
use crate::types::{Book, BookStatus};

/// Catalog entry inserted on startup when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedBook {
	pub book_id: &'static str,
	pub title: &'static str,
	pub author: &'static str,
}

const fn seed(book_id: &'static str, title: &'static str, author: &'static str) -> SeedBook {
	SeedBook { book_id, title, author }
}

pub static SEED_BOOKS: [SeedBook; 13] = [
	seed("H1H1", "Harry Potter and the Philosopher's Stone", "J.K. Rowling"),
	seed("H2H2", "Feathers of Fire", "Dr. APJ Abdul Kalam"),
	seed("M3M3", "Mahabharatha", "Vedavyasa"),
	seed("R4R4", "Srimath Ramayanam", "Valmiki"),
	seed("B5B5", "Srimath Bagvatham", "Vedavyasa"),
	seed("L6R6", "Lord of the Rings", "J.R.R. Tolkien"),
	seed("S7S7", "Sundarakanda", "Valmiki"),
	seed("H3H3", "Harry Potter and the Chamber of Secrets", "J.K. Rowling"),
	seed("H4H4", "Harry Potter and the Prisoner of Azkaban", "J.K. Rowling"),
	seed("H5H5", "Harry Potter and the Goblet of Fire", "J.K. Rowling"),
	seed("H6H6", "Harry Potter and the Order of the Phoenix", "J.K. Rowling"),
	seed("H7H7", "Harry Potter and the Half-Blood Prince", "J.K. Rowling"),
	seed("H8H8", "Harry Potter and the Deathly Hallows", "J.K. Rowling"),
];

/// Inserts a new book as available.
///
/// An id already in the catalog fails with the store's uniqueness error.
pub async fn add_book(db: &DB, book_id: &str, title: &str, author: &str) -> Result<()> {
	db.exec(
		sqlx::query("INSERT INTO books (book_id, title, author, status) VALUES (?, ?, ?, ?)")
			.bind(book_id)
			.bind(title)
			.bind(author)
			.bind(BookStatus::Available)
	).await?;
	debug!(book_id, title, author, "book added");
	Ok(())
}

// transactions pointing at the book are left alone
pub async fn delete_book(db: &DB, book_id: &str) -> Result<u64> {
	let deleted = db.exec(
		sqlx::query("DELETE FROM books WHERE book_id = ?").bind(book_id)
	).await?;
	debug!(book_id, deleted, "book deleted");
	Ok(deleted)
}

pub async fn update_book_status(db: &DB, book_id: &str, status: BookStatus) -> Result<u64> {
	let updated = db.exec(
		sqlx::query("UPDATE books SET status = ? WHERE book_id = ?")
			.bind(status)
			.bind(book_id)
	).await?;
	if updated == 0 {
		warn!(book_id, %status, "status update matched no book");
	}
	Ok(updated)
}

pub async fn book_status(db: &DB, book_id: &str) -> Result<Option<BookStatus>> {
	let status = sqlx::query_scalar("SELECT status FROM books WHERE book_id = ?")
		.bind(book_id)
		.fetch_optional(db.pool()).await?;
	Ok(status)
}

pub async fn get_book(db: &DB, book_id: &str) -> Result<Option<Book>> {
	let book = sqlx::query_as::<_, Book>("SELECT book_id, title, author, status FROM books WHERE book_id = ?")
		.bind(book_id)
		.fetch_optional(db.pool()).await?;
	Ok(book)
}

/// Inserts every seed book not yet in the catalog and returns the ones that
/// were actually added. Existing rows, whatever their status, are kept.
pub async fn seed_catalog(db: &DB) -> Result<Vec<&'static SeedBook>> {
	let mut added = Vec::new();
	for book in SEED_BOOKS.iter() {
		let inserted = db.exec(
			sqlx::query("INSERT OR IGNORE INTO books (book_id, title, author, status) VALUES (?, ?, ?, ?)")
				.bind(book.book_id)
				.bind(book.title)
				.bind(book.author)
				.bind(BookStatus::Available)
		).await?;
		if inserted > 0 {
			added.push(book);
		}
	}
	debug!(added = added.len(), total = SEED_BOOKS.len(), "catalog seeded");
	Ok(added)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use crate::sql::open_in_memory;

	#[tokio::test]
	async fn added_book_is_available() {
		let db = open_in_memory().await.unwrap();
		add_book(&db, "X1", "Title", "Author").await.unwrap();

		assert_eq!(book_status(&db, "X1").await.unwrap(), Some(BookStatus::Available));
		let book = get_book(&db, "X1").await.unwrap().unwrap();
		assert_eq!(book, Book {
			book_id: "X1".to_string(),
			title: "Title".to_string(),
			author: "Author".to_string(),
			status: BookStatus::Available,
		});
	}

	#[tokio::test]
	async fn duplicate_id_is_rejected() {
		let db = open_in_memory().await.unwrap();
		add_book(&db, "X1", "Title", "Author").await.unwrap();

		let err = add_book(&db, "X1", "Other", "Someone").await.unwrap_err();
		match err {
			Error::Sqlx(sqlx::Error::Database(e)) => assert!(e.is_unique_violation()),
			other => panic!("expected unique violation, got {other:?}"),
		}
		assert_eq!(get_book(&db, "X1").await.unwrap().unwrap().title, "Title");
	}

	#[tokio::test]
	async fn delete_removes_and_repeats_as_noop() {
		let db = open_in_memory().await.unwrap();
		add_book(&db, "X1", "Title", "Author").await.unwrap();

		assert_eq!(delete_book(&db, "X1").await.unwrap(), 1);
		assert_eq!(book_status(&db, "X1").await.unwrap(), None);
		assert_eq!(delete_book(&db, "X1").await.unwrap(), 0);
	}

	#[tokio::test]
	async fn status_update_overwrites() {
		let db = open_in_memory().await.unwrap();
		add_book(&db, "X1", "Title", "Author").await.unwrap();

		assert_eq!(update_book_status(&db, "X1", BookStatus::Issued).await.unwrap(), 1);
		assert_eq!(book_status(&db, "X1").await.unwrap(), Some(BookStatus::Issued));
		assert_eq!(update_book_status(&db, "X1", BookStatus::Issued).await.unwrap(), 1);
		assert_eq!(update_book_status(&db, "missing", BookStatus::Available).await.unwrap(), 0);
	}

	#[tokio::test]
	async fn seeding_twice_adds_nothing_new() {
		let db = open_in_memory().await.unwrap();
		let first = seed_catalog(&db).await.unwrap();
		assert_eq!(first.len(), SEED_BOOKS.len());

		update_book_status(&db, "H1H1", BookStatus::Issued).await.unwrap();
		let second = seed_catalog(&db).await.unwrap();
		assert!(second.is_empty());
		assert_eq!(book_status(&db, "H1H1").await.unwrap(), Some(BookStatus::Issued));
	}

	#[tokio::test]
	async fn seeding_fills_in_deleted_books() {
		let db = open_in_memory().await.unwrap();
		seed_catalog(&db).await.unwrap();
		delete_book(&db, "M3M3").await.unwrap();

		let added = seed_catalog(&db).await.unwrap();
		assert_eq!(added.len(), 1);
		assert_eq!(added[0].title, "Mahabharatha");
	}
}
