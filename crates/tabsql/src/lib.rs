//! # tabsql
//!
//! A dialect-aware SQL statement composer with tabular import/export helpers.
//!
//! ## Features
//!
//! - **Fragments, not ASTs**: each clause is a pre-formatted string; the
//!   composer only decides where it goes and what the dialect calls it
//! - **One statement at a time**: SELECT, DELETE, UPDATE and INSERT are
//!   mutually exclusive; switching kinds drops the old fragment
//! - **Filter chains**: WHERE and HAVING predicates joined with AND/OR in
//!   insertion order
//! - **Dialect strategies**: row limits become `TOP n` on SQL Server and a
//!   trailing `LIMIT n` on PostgreSQL and SQLite
//! - **Tabular plumbing**: import rows from any [`RowSource`] as batched
//!   INSERTs, export SELECT results into any [`RowSink`]
//!
//! ## Composer
//!
//! ```
//! use tabsql::{Composer, Dialect};
//!
//! let mut q = Composer::new(Dialect::Postgres);
//! q.select("id, name").from("users").order_by("name").limit(Some(5));
//! q.where_("active").and("age > 30");
//!
//! assert_eq!(
//!     q.render().unwrap(),
//!     "SELECT id, name\nFROM users\nWHERE\nactive\nAND age > 30\nORDER BY name\nLIMIT 5"
//! );
//! ```
//!
//! ## Import
//!
//! ```ignore
//! use tabsql::{ImportConfig, Importer};
//!
//! let importer = Importer::new(ImportConfig::load("import.toml")?)?;
//! let report = importer.run(&mut source, &client).await?;
//! ```

pub mod client;
pub mod compose;
pub mod config;
pub mod dialect;
pub mod error;
pub mod export;
pub mod import;
pub mod row;
pub mod table;

pub use client::Executor;
pub use compose::{Clause, Composer, Filter, FilterChain, Operator, Statement, StatementKind};
pub use config::ImportConfig;
pub use dialect::{Dialect, LimitOffsetRenderer, Renderer, SqlServerRenderer};
pub use error::{ComposeError, ComposeResult, TabError, TabResult};
pub use export::export;
pub use import::{ImportReport, Importer};
pub use row::{Row, Value};
pub use table::{Column, ColumnType, MemorySink, MemorySource, RowSink, RowSource};
