use std::fmt;

use chrono::NaiveDate;

pub type Bid = String;
pub type Uid = i64;
pub type Tid = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum BookStatus {
	Available,
	Issued,
}

impl BookStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			BookStatus::Available => "available",
			BookStatus::Issued => "issued",
		}
	}

	pub fn is_available(self) -> bool {
		matches!(self, BookStatus::Available)
	}
}

impl fmt::Display for BookStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
	pub book_id: Bid,
	pub title: String,
	pub author: String,
	pub status: BookStatus,
}

/// A registered account.
///
/// The password is kept exactly as typed. Nothing here is fit for real
/// credentials.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
	pub user_id: Uid,
	pub username: String,
	pub password: String,
}

/// One lending of one book; `return_date` stays `None` until it comes back.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Transaction {
	pub transaction_id: Tid,
	pub user_id: Uid,
	pub book_id: Bid,
	pub issue_date: NaiveDate,
	pub return_date: Option<NaiveDate>,
}

impl Transaction {
	pub fn is_open(&self) -> bool {
		self.return_date.is_none()
	}
}

/// The logged in user, handed to every operation of the member menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
	pub uid: Uid,
	pub username: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_renders_lowercase() {
		assert_eq!(BookStatus::Available.to_string(), "available");
		assert_eq!(BookStatus::Issued.to_string(), "issued");
		assert!(BookStatus::Available.is_available());
		assert!(!BookStatus::Issued.is_available());
	}
}
