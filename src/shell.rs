//! Text menu over any reader/writer pair.
//!
//! The top level offers Register/Login/Exit; a successful login opens the
//! member menu for that [`Session`] until Logout. Choices are a number or
//! the option's name in any case.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::books::{add_book, delete_book, get_book, seed_catalog};
use crate::error::Result;
use crate::lending::{issue_book, return_book, IssueOutcome};
use crate::sql::DB;
use crate::types::{Session, Tid};
use crate::users::{login_user, register_user};

const MAIN_MENU: &str = "\n1. Register\n2. Login\n3. Exit";
const MEMBER_MENU: &str = "\n1. Add Book\n2. Delete Book\n3. Issue Book\n4. Return Book\n5. Logout";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
	Register,
	Login,
	Exit,
}

impl MainChoice {
	pub fn parse(input: &str) -> Option<Self> {
		match input.trim().to_lowercase().as_str() {
			"1" | "register" => Some(MainChoice::Register),
			"2" | "login" => Some(MainChoice::Login),
			"3" | "exit" => Some(MainChoice::Exit),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberChoice {
	AddBook,
	DeleteBook,
	IssueBook,
	ReturnBook,
	Logout,
}

impl MemberChoice {
	pub fn parse(input: &str) -> Option<Self> {
		match input.trim().to_lowercase().as_str() {
			"1" | "add book" => Some(MemberChoice::AddBook),
			"2" | "delete book" => Some(MemberChoice::DeleteBook),
			"3" | "issue book" => Some(MemberChoice::IssueBook),
			"4" | "return book" => Some(MemberChoice::ReturnBook),
			"5" | "logout" => Some(MemberChoice::Logout),
			_ => None,
		}
	}
}

// whether the shell keeps going after a step; input running out is a quit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
	Continue,
	Quit,
}

pub struct Shell<'db, R, W> {
	db: &'db DB,
	input: R,
	out: W,
}

impl<'db, R: BufRead, W: Write> Shell<'db, R, W> {
	pub fn new(db: &'db DB, input: R, out: W) -> Self {
		Shell { db, input, out }
	}

	pub fn into_output(self) -> W {
		self.out
	}

	/// Seeds the catalog and runs the menus until Exit or end of input.
	///
	/// Lookup failures are printed and the menu carries on; any other error,
	/// a duplicate book id included, ends the run.
	pub async fn run(&mut self) -> Result<()> {
		writeln!(self.out, "Welcome to the Library Management System")?;
		for book in seed_catalog(self.db).await? {
			writeln!(self.out, "Added {} by {} with ID {}", book.title, book.author, book.book_id)?;
		}

		loop {
			writeln!(self.out, "{MAIN_MENU}")?;
			let Some(choice) = self.prompt("Enter your choice: ")? else {
				break;
			};
			let flow = match MainChoice::parse(&choice) {
				Some(MainChoice::Register) => self.register().await?,
				Some(MainChoice::Login) => self.login().await?,
				Some(MainChoice::Exit) => Flow::Quit,
				None => {
					writeln!(self.out, "{INVALID_CHOICE}")?;
					Flow::Continue
				},
			};
			if flow == Flow::Quit {
				break;
			}
		}
		self.out.flush()?;
		Ok(())
	}

	// None once the input is exhausted
	fn prompt(&mut self, text: &str) -> Result<Option<String>> {
		write!(self.out, "{text}")?;
		self.out.flush()?;

		let mut line = String::new();
		if self.input.read_line(&mut line)? == 0 {
			return Ok(None);
		}
		Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
	}

	fn credentials(&mut self) -> Result<Option<(String, String)>> {
		let Some(username) = self.prompt("Enter username: ")? else {
			return Ok(None);
		};
		let Some(password) = self.prompt("Enter password: ")? else {
			return Ok(None);
		};
		Ok(Some((username, password)))
	}

	fn recover<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
		match result {
			Ok(value) => Ok(Some(value)),
			Err(e) if e.is_not_found() => {
				writeln!(self.out, "Error: {e}")?;
				Ok(None)
			},
			Err(e) => Err(e),
		}
	}

	async fn register(&mut self) -> Result<Flow> {
		let Some((username, password)) = self.credentials()? else {
			return Ok(Flow::Quit);
		};
		register_user(self.db, &username, &password).await?;
		writeln!(self.out, "User registered successfully!")?;
		Ok(Flow::Continue)
	}

	async fn login(&mut self) -> Result<Flow> {
		let Some((username, password)) = self.credentials()? else {
			return Ok(Flow::Quit);
		};
		match login_user(self.db, &username, &password).await? {
			Some(uid) => {
				writeln!(self.out, "Logged in successfully!")?;
				let session = Session { uid, username };
				info!(uid, username = %session.username, "session started");
				let flow = self.member_menu(&session).await?;
				info!(uid, "session ended");
				Ok(flow)
			},
			None => {
				writeln!(self.out, "Invalid username or password")?;
				Ok(Flow::Continue)
			},
		}
	}

	async fn member_menu(&mut self, session: &Session) -> Result<Flow> {
		loop {
			writeln!(self.out, "{MEMBER_MENU}")?;
			let Some(choice) = self.prompt("Enter your choice: ")? else {
				return Ok(Flow::Quit);
			};
			let flow = match MemberChoice::parse(&choice) {
				Some(MemberChoice::AddBook) => self.add_book().await?,
				Some(MemberChoice::DeleteBook) => self.delete_book().await?,
				Some(MemberChoice::IssueBook) => self.issue_book(session).await?,
				Some(MemberChoice::ReturnBook) => self.return_book().await?,
				Some(MemberChoice::Logout) => return Ok(Flow::Continue),
				None => {
					writeln!(self.out, "{INVALID_CHOICE}")?;
					Flow::Continue
				},
			};
			if flow == Flow::Quit {
				return Ok(Flow::Quit);
			}
		}
	}

	async fn add_book(&mut self) -> Result<Flow> {
		let Some(book_id) = self.prompt("Enter book ID: ")? else {
			return Ok(Flow::Quit);
		};
		let Some(title) = self.prompt("Enter book title: ")? else {
			return Ok(Flow::Quit);
		};
		let Some(author) = self.prompt("Enter book author: ")? else {
			return Ok(Flow::Quit);
		};
		add_book(self.db, &book_id, &title, &author).await?;
		writeln!(self.out, "Book added successfully!")?;
		Ok(Flow::Continue)
	}

	async fn delete_book(&mut self) -> Result<Flow> {
		let Some(book_id) = self.prompt("Enter book ID to delete: ")? else {
			return Ok(Flow::Quit);
		};
		if delete_book(self.db, &book_id).await? > 0 {
			writeln!(self.out, "Book deleted successfully!")?;
		} else {
			writeln!(self.out, "No book with ID {book_id}")?;
		}
		Ok(Flow::Continue)
	}

	async fn issue_book(&mut self, session: &Session) -> Result<Flow> {
		let Some(book_id) = self.prompt("Enter book ID to issue: ")? else {
			return Ok(Flow::Quit);
		};
		let result = issue_book(self.db, session.uid, &book_id).await;
		match self.recover(result)? {
			Some(IssueOutcome::Issued(tid)) => {
				let title = get_book(self.db, &book_id).await?
					.map(|book| book.title)
					.unwrap_or(book_id);
				writeln!(self.out, "Issued {title}. Transaction ID: {tid}")?;
			},
			Some(IssueOutcome::AlreadyIssued) => writeln!(self.out, "Book is already issued")?,
			None => {},
		}
		Ok(Flow::Continue)
	}

	async fn return_book(&mut self) -> Result<Flow> {
		let Some(input) = self.prompt("Enter transaction ID to return: ")? else {
			return Ok(Flow::Quit);
		};
		let tid: Tid = match input.trim().parse() {
			Ok(tid) => tid,
			Err(_) => {
				debug!(%input, "unparsable transaction id");
				writeln!(self.out, "Invalid transaction ID")?;
				return Ok(Flow::Continue);
			},
		};
		let result = return_book(self.db, tid).await;
		if self.recover(result)?.is_some() {
			writeln!(self.out, "Book returned successfully!")?;
		}
		Ok(Flow::Continue)
	}
}
