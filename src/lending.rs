//! Issue and return.
//!
//! A book moves `available -> issued` on issue and back to `available` on
//! return; each issue leaves one row in `transactions`.

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::books::{book_status, update_book_status};
use crate::error::{Error, Result};
use crate::sql::DB;
use crate::types::{BookStatus, Tid, Transaction, Uid};
use crate::users::get_user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOutcome {
	Issued(Tid),
	/// The book was not available; nothing was written.
	AlreadyIssued,
}

pub fn today() -> NaiveDate {
	Local::now().date_naive()
}

/// Lends a book to `uid` dated today.
///
/// An unknown book is `Error::BookNotFound` and an unknown user, checked only
/// when the book is available, is `Error::UserNotFound`. Neither writes
/// anything.
pub async fn issue_book(db: &DB, uid: Uid, book_id: &str) -> Result<IssueOutcome> {
	issue_book_on(db, uid, book_id, today()).await
}

pub async fn issue_book_on(db: &DB, uid: Uid, book_id: &str, date: NaiveDate) -> Result<IssueOutcome> {
	let status = book_status(db, book_id).await?
		.ok_or_else(|| Error::BookNotFound(book_id.to_string()))?;
	if !status.is_available() {
		debug!(uid, book_id, "issue refused, book already issued");
		return Ok(IssueOutcome::AlreadyIssued);
	}
	if get_user(db, uid).await?.is_none() {
		return Err(Error::UserNotFound(uid));
	}

	let tid = db.insert(
		sqlx::query("INSERT INTO transactions (user_id, book_id, issue_date, return_date) VALUES (?, ?, ?, ?)")
			.bind(uid)
			.bind(book_id)
			.bind(date)
			.bind(None::<NaiveDate>)
	).await?;
	update_book_status(db, book_id, BookStatus::Issued).await?;
	debug!(tid, uid, book_id, %date, "book issued");
	Ok(IssueOutcome::Issued(tid))
}

pub async fn return_book(db: &DB, tid: Tid) -> Result<()> {
	return_book_on(db, tid, today()).await
}

/// Closes a transaction and makes its book available again.
///
/// Neither step looks at the current state: a returned transaction gets its
/// date overwritten and the book is set available whatever it was. If the
/// book has been deleted the status update matches nothing.
pub async fn return_book_on(db: &DB, tid: Tid, date: NaiveDate) -> Result<()> {
	let transaction = get_transaction(db, tid).await?
		.ok_or(Error::TransactionNotFound(tid))?;
	if !transaction.is_open() {
		debug!(tid, "transaction returned again");
	}

	db.exec(
		sqlx::query("UPDATE transactions SET return_date = ? WHERE transaction_id = ?")
			.bind(date)
			.bind(tid)
	).await?;

	let updated = update_book_status(db, &transaction.book_id, BookStatus::Available).await?;
	if updated == 0 {
		warn!(tid, book_id = %transaction.book_id, "returned book is no longer in the catalog");
	}
	debug!(tid, book_id = %transaction.book_id, %date, "book returned");
	Ok(())
}

pub async fn get_transaction(db: &DB, tid: Tid) -> Result<Option<Transaction>> {
	let transaction = sqlx::query_as::<_, Transaction>(
		"SELECT transaction_id, user_id, book_id, issue_date, return_date FROM transactions WHERE transaction_id = ?"
	)
		.bind(tid)
		.fetch_optional(db.pool()).await?;
	Ok(transaction)
}

/// Every lending of a book, oldest first, returned or not. Used to inspect
/// a book's history; no menu option reads it.
pub async fn transactions_for_book(db: &DB, book_id: &str) -> Result<Vec<Transaction>> {
	let transactions = sqlx::query_as::<_, Transaction>(
		"SELECT transaction_id, user_id, book_id, issue_date, return_date FROM transactions WHERE book_id = ? ORDER BY transaction_id"
	)
		.bind(book_id)
		.fetch_all(db.pool()).await?;
	Ok(transactions)
}
