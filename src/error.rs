use thiserror::Error;

use crate::types::{Bid, Tid, Uid};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("console error: {0}")]
	Io(#[from] std::io::Error),

	#[error("no book with ID {0}")]
	BookNotFound(Bid),

	#[error("no user with ID {0}")]
	UserNotFound(Uid),

	#[error("no transaction with ID {0}")]
	TransactionNotFound(Tid),
}

impl Error {
	/// Lookup failures the shell reports and moves past; everything else
	/// ends the session.
	pub fn is_not_found(&self) -> bool {
		matches!(
			self,
			Error::BookNotFound(_) | Error::UserNotFound(_) | Error::TransactionNotFound(_)
		)
	}
}
