// library system

use std::io;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use lsys::config::Config;
use lsys::shell::Shell;
use lsys::sql;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	// logs go to stderr, the menu owns stdout
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	fmt().with_env_filter(filter).with_writer(io::stderr).init();

	let config = Config::from_env();
	let db = sql::open(&config.database_url).await
		.with_context(|| format!("can't connect to database at {}", config.database_url))?;

	let result = {
		let stdin = io::stdin();
		let stdout = io::stdout();
		let mut shell = Shell::new(&db, stdin.lock(), stdout.lock());
		shell.run().await
	};
	db.close().await;

	result.context("library session aborted")
}
