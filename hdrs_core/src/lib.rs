//! `hdrs_core` is the engine behind `hdrs`, an include-what-you-use helper
//! for C and C++. It keeps a persistent identifier to header database, extracts
//! the qualified identifiers of a source file and reports the complete set of
//! headers the file needs, learning unknown identifiers interactively.
//!
//! ## Processing Pipeline
//!
//! ```text
//! source file
//!   → Lexer (logos token stream of identifiers, `::` and everything else)
//!   → Extractor (joins `a :: b :: c` into qualified identifiers)
//!   → Session (exact mappings, then wildcard rules in priority order)
//!   → Prompter (asks about identifiers matched by `?` rules)
//!   → Database store (persists every learned rule atomically)
//! ```
//!
//! ## Database Format
//!
//! ```text
//! ? boost::*              ask about anything in boost
//! ! std::__*              never needs a header
//! std::chrono::* = <chrono>
//! std::vector = <vector>
//! ```
//!
//! Exact mappings always win. Deny (`!`) and mapping rules are tried in the
//! order they appear in the file, and query (`?`) rules are tried last.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use hdrs_core::DatabaseStore;
//! use hdrs_core::Session;
//! use hdrs_core::StdioPrompter;
//!
//! let mut session = Session::open(DatabaseStore::new("header_database.txt")).unwrap();
//! let mut prompter = StdioPrompter::new(std::io::stdin().lock(), std::io::stderr());
//! let resolution = session
//! 	.resolve_file(Path::new("main.cpp"), &mut prompter)
//! 	.unwrap();
//! print!("{}", resolution.render("main.cpp"));
//! session.close().unwrap();
//! ```

pub use config::*;
pub use database::*;
pub use error::*;
pub use extractor::*;
pub use lexer::SourceToken;
pub use lexer::TokenKind;
pub use matcher::*;
pub use pattern::*;
pub use prompt::*;
pub use resolver::*;

pub mod config;
mod database;
#[allow(unused_assignments)]
mod error;
mod extractor;
pub(crate) mod lexer;
mod matcher;
mod pattern;
mod prompt;
mod resolver;
