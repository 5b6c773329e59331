use super::{Clause, Composer, Operator, fill};
use crate::error::ComposeResult;
use std::fmt::Display;

/// Handle for extending one filter chain.
///
/// Returned by [`Composer::where_`] and [`Composer::having`]. Filters appended
/// through the handle always land in the clause it was opened for.
///
/// ```
/// use tabsql::{Composer, Dialect};
///
/// let mut q = Composer::new(Dialect::Postgres);
/// q.select("dept, COUNT(*)").from("staff").group_by("dept");
/// q.where_("active").and("age > 30");
/// q.having("COUNT(*) > 5").or("dept = 'ops'");
///
/// let sql = q.render().unwrap();
/// assert!(sql.contains("WHERE\nactive\nAND age > 30"));
/// assert!(sql.contains("HAVING\nCOUNT(*) > 5\nOR dept = 'ops'"));
/// ```
#[derive(Debug)]
pub struct FilterChain<'a> {
    composer: &'a mut Composer,
    clause: Clause,
}

impl<'a> FilterChain<'a> {
    pub(crate) fn new(composer: &'a mut Composer, clause: Clause) -> Self {
        Self { composer, clause }
    }

    /// Clause this chain appends to.
    pub fn clause(&self) -> Clause {
        self.clause
    }

    /// Append an `AND` filter.
    pub fn and(self, text: &str) -> Self {
        self.push(Operator::And, text.to_owned())
    }

    /// Append an `OR` filter.
    pub fn or(self, text: &str) -> Self {
        self.push(Operator::Or, text.to_owned())
    }

    /// Templated form of [`FilterChain::and`].
    pub fn and_fmt(self, template: &str, args: &[&dyn Display]) -> ComposeResult<Self> {
        let text = fill(template, args)?;
        Ok(self.push(Operator::And, text))
    }

    /// Templated form of [`FilterChain::or`].
    pub fn or_fmt(self, template: &str, args: &[&dyn Display]) -> ComposeResult<Self> {
        let text = fill(template, args)?;
        Ok(self.push(Operator::Or, text))
    }

    /// Render the whole statement the chain belongs to.
    pub fn render(&self) -> ComposeResult<String> {
        self.composer.render()
    }

    /// Release the handle and continue configuring the composer.
    pub fn done(self) -> &'a mut Composer {
        self.composer
    }

    fn push(self, operator: Operator, text: String) -> Self {
        self.composer.push_filter(operator, text, self.clause);
        self
    }
}
