use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://library.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub database_url: String,
}

impl Config {
	/// Reads `.env` when there is one, then the process environment.
	pub fn from_env() -> Self {
		if let Err(e) = dotenvy::dotenv() {
			if !e.not_found() {
				warn!(error = %e, "ignoring unreadable .env");
			}
		}
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let database_url = lookup("DATABASE_URL")
			.filter(|url| !url.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
		Config { database_url }
	}
}
