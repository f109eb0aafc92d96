use tracing::debug;

use crate::error::Result;
use crate::sql::DB;
use crate::types::{Uid, User};

/// Stores a new account and returns its id. Usernames may repeat and the
/// password is stored as given.
pub async fn register_user(db: &DB, username: &str, password: &str) -> Result<Uid> {
	let uid = db.insert(
		sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
			.bind(username)
			.bind(password)
	).await?;
	debug!(uid, username, "user registered");
	Ok(uid)
}

/// Exact match on both fields. With duplicate credentials whichever row
/// SQLite yields first wins.
pub async fn login_user(db: &DB, username: &str, password: &str) -> Result<Option<Uid>> {
	let uid = sqlx::query_scalar("SELECT user_id FROM users WHERE username = ? AND password = ?")
		.bind(username)
		.bind(password)
		.fetch_optional(db.pool()).await?;
	debug!(username, found = uid.is_some(), "login attempt");
	Ok(uid)
}

pub async fn get_user(db: &DB, uid: Uid) -> Result<Option<User>> {
	let user = sqlx::query_as::<_, User>("SELECT user_id, username, password FROM users WHERE user_id = ?")
		.bind(uid)
		.fetch_optional(db.pool()).await?;
	Ok(user)
}
