//! Dialect-aware SQL statement composer.
//!
//! A [`Composer`] accumulates pre-formatted clause fragments and renders them
//! into a complete statement for its dialect. Fragments are copied verbatim;
//! the composer only decides where they go.
//!
//! # Example
//!
//! ```
//! use tabsql::{Composer, Dialect};
//!
//! let mut q = Composer::new(Dialect::SqlServer);
//! q.select("id, name").from("users").limit(Some(10));
//! q.where_("status = 'active'").or("role = 'admin'");
//!
//! assert_eq!(
//!     q.render().unwrap(),
//!     "SELECT TOP 10 id, name\nFROM users\nWHERE\nstatus = 'active'\nOR role = 'admin'"
//! );
//! ```

mod chain;
mod filter;
mod template;

pub use chain::FilterChain;
pub use filter::{Clause, Filter, Operator, render_chain};
pub use template::fill;

use crate::dialect::{self, Dialect, Renderer};
use crate::error::{ComposeError, ComposeResult};
use std::fmt::{self, Display};
use std::sync::Arc;

/// The statement kind a composer currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatementKind {
    #[default]
    None,
    Select,
    Delete,
    Update,
    Insert,
}

impl StatementKind {
    pub fn keyword(self) -> &'static str {
        match self {
            StatementKind::None => "NONE",
            StatementKind::Select => "SELECT",
            StatementKind::Delete => "DELETE",
            StatementKind::Update => "UPDATE",
            StatementKind::Insert => "INSERT",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The active statement and the fragment that belongs only to it.
///
/// Switching kinds replaces the whole value, so a fragment set for one kind
/// can never be rendered under another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Statement {
    #[default]
    None,
    /// `SELECT <columns>`
    Select { columns: String },
    /// `DELETE <target>`
    Delete { target: String },
    /// `UPDATE <table>`
    Update { table: String },
    /// `INSERT INTO <into>`
    Insert { into: String },
}

impl Statement {
    fn new(kind: StatementKind, text: String) -> Self {
        match kind {
            StatementKind::None => Statement::None,
            StatementKind::Select => Statement::Select { columns: text },
            StatementKind::Delete => Statement::Delete { target: text },
            StatementKind::Update => Statement::Update { table: text },
            StatementKind::Insert => Statement::Insert { into: text },
        }
    }

    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::None => StatementKind::None,
            Statement::Select { .. } => StatementKind::Select,
            Statement::Delete { .. } => StatementKind::Delete,
            Statement::Update { .. } => StatementKind::Update,
            Statement::Insert { .. } => StatementKind::Insert,
        }
    }

    /// The statement-specific fragment, if a statement is active.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Statement::None => None,
            Statement::Select { columns } => Some(columns),
            Statement::Delete { target } => Some(target),
            Statement::Update { table } => Some(table),
            Statement::Insert { into } => Some(into),
        }
    }

    fn clear_fragment(&mut self) {
        match self {
            Statement::None => {}
            Statement::Select { columns: s }
            | Statement::Delete { target: s }
            | Statement::Update { table: s }
            | Statement::Insert { into: s } => s.clear(),
        }
    }
}

/// Generates a statement-type setter and its templated `_fmt` form.
macro_rules! statement_setter {
    ($(#[$doc:meta])* $name:ident, $name_fmt:ident, $kind:expr) => {
        $(#[$doc])*
        pub fn $name<'a>(&mut self, fragment: impl Into<Option<&'a str>>) -> &mut Self {
            self.set_statement($kind, fragment.into());
            self
        }

        #[doc = concat!("Templated form of [`Composer::", stringify!($name), "`].")]
        pub fn $name_fmt(
            &mut self,
            template: &str,
            args: &[&dyn Display],
        ) -> ComposeResult<&mut Self> {
            let text = fill(template, args)?;
            Ok(self.$name(text.as_str()))
        }
    };
}

/// Generates a clause setter (`None` clears) and its templated `_fmt` form.
macro_rules! clause_setter {
    ($(#[$doc:meta])* $name:ident, $name_fmt:ident, $field:ident) => {
        $(#[$doc])*
        pub fn $name<'a>(&mut self, fragment: impl Into<Option<&'a str>>) -> &mut Self {
            self.$field = fragment.into().map(str::to_owned);
            self
        }

        #[doc = concat!("Templated form of [`Composer::", stringify!($name), "`].")]
        pub fn $name_fmt(
            &mut self,
            template: &str,
            args: &[&dyn Display],
        ) -> ComposeResult<&mut Self> {
            let text = fill(template, args)?;
            Ok(self.$name(text.as_str()))
        }
    };
}

/// Mutable SQL statement composer bound to one dialect.
///
/// Every setter returns `&mut Self` so calls can be chained. Rendering never
/// caches: each [`Composer::render`] derives the text from the current state.
#[derive(Debug, Clone)]
pub struct Composer {
    dialect: Dialect,
    renderer: Option<Arc<dyn Renderer>>,
    statement: Statement,
    limit: Option<u64>,
    from: Option<String>,
    values: Option<String>,
    order_by: Option<String>,
    group_by: Option<String>,
    sets: Vec<String>,
    filters: Vec<Filter>,
    active: Option<Clause>,
}

impl Composer {
    /// Create an empty composer using the built-in renderer for `dialect`.
    ///
    /// Construction never fails; a dialect without a renderer errors at
    /// [`Composer::render`].
    pub fn new(dialect: Dialect) -> Self {
        Self::build(dialect, dialect::renderer_for(dialect))
    }

    /// Create an empty composer that renders through a custom strategy.
    pub fn with_renderer(renderer: Arc<dyn Renderer>) -> Self {
        Self::build(renderer.dialect(), Some(renderer))
    }

    fn build(dialect: Dialect, renderer: Option<Arc<dyn Renderer>>) -> Self {
        Self {
            dialect,
            renderer,
            statement: Statement::None,
            limit: None,
            from: None,
            values: None,
            order_by: None,
            group_by: None,
            sets: Vec::new(),
            filters: Vec::new(),
            active: None,
        }
    }

    // ==================== Statement fragments ====================

    fn set_statement(&mut self, kind: StatementKind, fragment: Option<&str>) {
        match fragment {
            Some(text) => self.statement = Statement::new(kind, text.to_owned()),
            None if self.statement.kind() == kind => self.statement.clear_fragment(),
            None => {}
        }
    }

    statement_setter! {
        /// Switch to a SELECT statement with the given column list.
        select, select_fmt, StatementKind::Select
    }

    statement_setter! {
        /// Switch to a DELETE statement targeting `fragment` (e.g. `FROM users`).
        delete, delete_fmt, StatementKind::Delete
    }

    statement_setter! {
        /// Switch to an UPDATE statement on `fragment`.
        update, update_fmt, StatementKind::Update
    }

    statement_setter! {
        /// Switch to an INSERT statement; `fragment` follows `INSERT INTO`.
        insert_into, insert_into_fmt, StatementKind::Insert
    }

    // ==================== Clause fragments ====================

    clause_setter! {
        /// Set the FROM fragment (rendered for SELECT only).
        from, from_fmt, from
    }

    clause_setter! {
        /// Set the VALUES fragment; it is wrapped in parentheses when rendered.
        values, values_fmt, values
    }

    clause_setter! {
        /// Set the ORDER BY fragment.
        order_by, order_by_fmt, order_by
    }

    clause_setter! {
        /// Set the GROUP BY fragment.
        group_by, group_by_fmt, group_by
    }

    /// Set or clear the row limit.
    pub fn limit(&mut self, rows: Option<u64>) -> &mut Self {
        self.limit = rows;
        self
    }

    /// Append an assignment to the SET list of an UPDATE.
    pub fn set(&mut self, assignment: &str) -> &mut Self {
        self.sets.push(assignment.to_owned());
        self
    }

    /// Templated form of [`Composer::set`].
    pub fn set_fmt(&mut self, template: &str, args: &[&dyn Display]) -> ComposeResult<&mut Self> {
        let text = fill(template, args)?;
        Ok(self.set(&text))
    }

    /// Remove every SET assignment.
    pub fn clear_set(&mut self) -> &mut Self {
        self.sets.clear();
        self
    }

    // ==================== Filter chains ====================

    /// Open (or continue) the WHERE chain with an `AND` filter.
    ///
    /// The returned handle appends further filters to WHERE no matter which
    /// chain is opened on the composer afterwards.
    pub fn where_(&mut self, text: &str) -> FilterChain<'_> {
        self.open(Clause::Where, text.to_owned())
    }

    /// Templated form of [`Composer::where_`].
    pub fn where_fmt(
        &mut self,
        template: &str,
        args: &[&dyn Display],
    ) -> ComposeResult<FilterChain<'_>> {
        let text = fill(template, args)?;
        Ok(self.open(Clause::Where, text))
    }

    /// Open (or continue) the HAVING chain with an `AND` filter.
    pub fn having(&mut self, text: &str) -> FilterChain<'_> {
        self.open(Clause::Having, text.to_owned())
    }

    /// Templated form of [`Composer::having`].
    pub fn having_fmt(
        &mut self,
        template: &str,
        args: &[&dyn Display],
    ) -> ComposeResult<FilterChain<'_>> {
        let text = fill(template, args)?;
        Ok(self.open(Clause::Having, text))
    }

    /// Append an `AND` filter to the most recently opened chain.
    ///
    /// Fails with [`ComposeError::AmbiguousFilterTarget`] when neither
    /// [`Composer::where_`] nor [`Composer::having`] has been called.
    pub fn and(&mut self, text: &str) -> ComposeResult<&mut Self> {
        self.append(Operator::And, text.to_owned())
    }

    /// Templated form of [`Composer::and`].
    pub fn and_fmt(&mut self, template: &str, args: &[&dyn Display]) -> ComposeResult<&mut Self> {
        let text = fill(template, args)?;
        self.append(Operator::And, text)
    }

    /// Append an `OR` filter to the most recently opened chain.
    pub fn or(&mut self, text: &str) -> ComposeResult<&mut Self> {
        self.append(Operator::Or, text.to_owned())
    }

    /// Templated form of [`Composer::or`].
    pub fn or_fmt(&mut self, template: &str, args: &[&dyn Display]) -> ComposeResult<&mut Self> {
        let text = fill(template, args)?;
        self.append(Operator::Or, text)
    }

    /// Remove every WHERE filter.
    pub fn clear_where(&mut self) -> &mut Self {
        self.filters.retain(|f| f.clause() != Clause::Where);
        self
    }

    /// Remove every HAVING filter.
    pub fn clear_having(&mut self) -> &mut Self {
        self.filters.retain(|f| f.clause() != Clause::Having);
        self
    }

    fn open(&mut self, clause: Clause, text: String) -> FilterChain<'_> {
        self.push_filter(Operator::And, text, clause);
        FilterChain::new(self, clause)
    }

    fn append(&mut self, operator: Operator, text: String) -> ComposeResult<&mut Self> {
        let clause = self
            .active
            .ok_or(ComposeError::AmbiguousFilterTarget { operator })?;
        self.push_filter(operator, text, clause);
        Ok(self)
    }

    pub(crate) fn push_filter(&mut self, operator: Operator, text: String, clause: Clause) {
        self.filters.push(Filter::new(operator, text, clause));
        self.active = Some(clause);
    }

    // ==================== Rendering ====================

    /// Render the statement for this composer's dialect.
    pub fn render(&self) -> ComposeResult<String> {
        let renderer = self
            .renderer
            .as_deref()
            .ok_or(ComposeError::UnsupportedDialect(self.dialect))?;
        let sql = renderer.render(self)?;
        tracing::trace!(
            target: "tabsql.compose",
            dialect = %self.dialect,
            kind = %self.kind(),
            filters = self.filters.len(),
            "rendered statement"
        );
        Ok(sql)
    }

    // ==================== Accessors ====================

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The rendering strategy, if the dialect has one.
    pub fn renderer(&self) -> Option<&dyn Renderer> {
        self.renderer.as_deref()
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn kind(&self) -> StatementKind {
        self.statement.kind()
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    pub fn from_fragment(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn values_fragment(&self) -> Option<&str> {
        self.values.as_deref()
    }

    pub fn order_by_fragment(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    pub fn group_by_fragment(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    pub fn set_fragments(&self) -> &[String] {
        &self.sets
    }

    /// All filters in insertion order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Filters of one clause, in insertion order.
    pub fn filters_for(&self, clause: Clause) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(move |f| f.clause() == clause)
    }

    /// The clause `and`/`or` currently append to.
    pub fn active_clause(&self) -> Option<Clause> {
        self.active
    }
}
