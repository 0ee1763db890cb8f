//! Extract, categorize and total transactions from bank statements.
//!
//! Two inputs are understood: the plain text of a PDF statement and tabular
//! CSV exports. Both produce a [`Statement`] with its period, transactions
//! and income/expense/category totals.
//!
//! ```rust,ignore
//! use statement_analyzer_rs::ParserBuilder;
//!
//! let statement = ParserBuilder::new()
//!     .content(&file_content)
//!     .mime_type("text/csv")
//!     .parse()?;
//!
//! println!("net change: {}", statement.net_change());
//! ```

mod builder;
mod types;

pub mod categories;
pub mod errors;
pub mod export;
pub mod insights;
pub mod parsers;

pub use builder::{FileFormat, ParserBuilder};
pub use categories::{Category, CategoryRules, KeywordRule};
pub use parsers::prelude::*;
pub use types::{Statement, StatementPeriod, Totals, Transaction};
