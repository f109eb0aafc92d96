use lsys::books::{add_book, book_status, get_book, seed_catalog, SEED_BOOKS};
use lsys::lending::{get_transaction, issue_book, return_book, today, IssueOutcome};
use lsys::shell::Shell;
use lsys::sql;
use lsys::types::BookStatus;
use lsys::users::{get_user, login_user, register_user};
use tempfile::TempDir;

fn database_url(dir: &TempDir) -> String {
	format!("sqlite://{}", dir.path().join("library.db").display())
}

#[tokio::test]
async fn alice_borrows_and_returns_a_book() {
	let db = sql::open_in_memory().await.unwrap();

	register_user(&db, "alice", "pw1").await.unwrap();
	let uid = login_user(&db, "alice", "pw1").await.unwrap().expect("alice should log in");

	add_book(&db, "X1", "Title", "Author").await.unwrap();
	let tid = match issue_book(&db, uid, "X1").await.unwrap() {
		IssueOutcome::Issued(tid) => tid,
		IssueOutcome::AlreadyIssued => panic!("X1 was just added"),
	};

	let transaction = get_transaction(&db, tid).await.unwrap().unwrap();
	assert_eq!(transaction.user_id, uid);
	assert_eq!(transaction.issue_date, today());
	assert_eq!(transaction.return_date, None);
	assert_eq!(book_status(&db, "X1").await.unwrap(), Some(BookStatus::Issued));

	return_book(&db, tid).await.unwrap();
	let transaction = get_transaction(&db, tid).await.unwrap().unwrap();
	assert_eq!(transaction.return_date, Some(today()));
	assert_eq!(book_status(&db, "X1").await.unwrap(), Some(BookStatus::Available));
}

#[tokio::test]
async fn accounts_register_and_log_in() {
	let db = sql::open_in_memory().await.unwrap();

	let alice = register_user(&db, "alice", "pw1").await.unwrap();
	let bob = register_user(&db, "bob", "pw2").await.unwrap();
	assert_ne!(alice, bob);
	assert_eq!(login_user(&db, "bob", "pw2").await.unwrap(), Some(bob));
	assert_eq!(login_user(&db, "bob", "pw1").await.unwrap(), None);

	let user = get_user(&db, alice).await.unwrap().unwrap();
	assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn state_survives_reopening_the_file() {
	let dir = TempDir::new().unwrap();
	let url = database_url(&dir);

	let db = sql::open(&url).await.unwrap();
	assert_eq!(seed_catalog(&db).await.unwrap().len(), SEED_BOOKS.len());
	let uid = register_user(&db, "alice", "pw1").await.unwrap();
	let IssueOutcome::Issued(tid) = issue_book(&db, uid, "L6R6").await.unwrap() else {
		panic!("seeded book should be available");
	};
	db.close().await;

	let db = sql::open(&url).await.unwrap();
	assert!(seed_catalog(&db).await.unwrap().is_empty());
	assert_eq!(login_user(&db, "alice", "pw1").await.unwrap(), Some(uid));
	assert_eq!(book_status(&db, "L6R6").await.unwrap(), Some(BookStatus::Issued));
	assert!(get_transaction(&db, tid).await.unwrap().unwrap().is_open());
	db.close().await;
}

#[tokio::test]
async fn shell_restarts_against_persisted_store() {
	let dir = TempDir::new().unwrap();
	let url = database_url(&dir);

	let db = sql::open(&url).await.unwrap();
	let mut shell = Shell::new(&db, "1\nalice\npw1\n2\nalice\npw1\n1\nZ9\nDune\nFrank Herbert\n5\n3\n".as_bytes(), Vec::new());
	shell.run().await.unwrap();
	db.close().await;

	let db = sql::open(&url).await.unwrap();
	let mut shell = Shell::new(&db, "3\n".as_bytes(), Vec::new());
	shell.run().await.unwrap();
	let output = String::from_utf8(shell.into_output()).unwrap();
	assert!(!output.contains("Added "));

	let book = get_book(&db, "Z9").await.unwrap().unwrap();
	assert_eq!(book.title, "Dune");
	assert_eq!(book.status, BookStatus::Available);
	db.close().await;
}
