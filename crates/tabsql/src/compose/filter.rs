//! Filter predicates for WHERE and HAVING chains.

use std::fmt;

/// Boolean operator joining a filter to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    /// SQL keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Clause a filter chain renders under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Where,
    Having,
}

impl Clause {
    /// SQL keyword opening this clause.
    pub fn keyword(self) -> &'static str {
        match self {
            Clause::Where => "WHERE",
            Clause::Having => "HAVING",
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single predicate fragment bound to a clause.
///
/// Filters are immutable. Their position inside a clause is the order they
/// were added; the first filter of a clause renders without its operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    operator: Operator,
    text: String,
    clause: Clause,
}

impl Filter {
    pub fn new(operator: Operator, text: impl Into<String>, clause: Clause) -> Self {
        Self {
            operator,
            text: text.into(),
            clause,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clause(&self) -> Clause {
        self.clause
    }
}

/// Render an ordered chain of filters, one per line.
///
/// Returns `None` when the chain is empty.
pub fn render_chain<'a>(filters: impl IntoIterator<Item = &'a Filter>) -> Option<String> {
    let mut filters = filters.into_iter();
    let first = filters.next()?;
    let mut out = first.text.clone();
    for filter in filters {
        out.push('\n');
        out.push_str(filter.operator.keyword());
        out.push(' ');
        out.push_str(&filter.text);
    }
    Some(out)
}
