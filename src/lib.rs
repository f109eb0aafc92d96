// library system

pub mod books;
pub mod config;
pub mod error;
pub mod lending;
pub mod shell;
pub mod sql;
pub mod types;
pub mod users;

pub use error::{Error, Result};
pub use sql::DB;
