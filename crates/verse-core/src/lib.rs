//! VerseDB Core Library
//!
//! Fundamental types shared by the query engine, the oracle and the binary.
//!
//! # Modules
//!
//! - `error` - Error types and result aliases
//! - `book` - Canonical book catalog and book selection sets
//! - `predicate` - Parameterized SQL predicates and statements
//! - `verse` - Verse references and store rows
//! - `prefix` - Routing prefixes (`ask:`, `key:`, ...)

pub mod book;
pub mod error;
pub mod predicate;
pub mod prefix;
pub mod verse;

pub use book::{Book, BookCatalog, BookId, BookSelection, Testament, BOOK_COUNT};
pub use error::{Error, Result};
pub use predicate::{BindValue, Predicate, Statement, DEFAULT_TABLE, VERSE_COLUMN, VERSE_ORDER};
pub use verse::{VerseReference, VerseRow};
