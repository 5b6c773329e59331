//! Row import: turns source rows into INSERT statements and runs them in
//! batches.
//!
//! # Example
//!
//! ```ignore
//! use tabsql::{ImportConfig, Importer, Dialect};
//!
//! let importer = Importer::new(ImportConfig::new(Dialect::Postgres, "people").batch_size(100))?;
//! let report = importer.run(&mut reader, &client).await?;
//! println!("imported {} rows in {} batches", report.rows, report.batches);
//! ```

use crate::client::Executor;
use crate::compose::Composer;
use crate::config::ImportConfig;
use crate::dialect::Renderer;
use crate::error::{ComposeError, TabError, TabResult};
use crate::row::Row;
use crate::table::{Column, RowSource, check_row};

/// Outcome of [`Importer::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Rows read from the source.
    pub rows: usize,
    /// Batches handed to the executor.
    pub batches: usize,
    /// Affected row count reported by the executor.
    pub affected: u64,
}

/// Builds INSERT statements for one target table.
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> TabResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// An INSERT composer whose target is `table (col, ...)` for `columns`.
    ///
    /// Only the VALUES fragment changes from row to row, so callers reuse the
    /// returned composer for every row of a source.
    pub fn insert_composer(&self, columns: &[Column]) -> TabResult<Composer> {
        if columns.is_empty() {
            return Err(TabError::validation("source has no columns"));
        }
        let mut composer = Composer::new(self.config.dialect);
        let renderer = renderer_of(&composer)?;

        let names: Vec<String> = columns
            .iter()
            .map(|c| self.column_ident(renderer, self.config.target_column(&c.name)))
            .collect();
        let table = self.table_ident(renderer);

        composer.insert_into_fmt("{0} ({1})", &[&table, &names.join(", ")])?;
        Ok(composer)
    }

    /// Set `composer`'s VALUES fragment to the literals of `row`.
    pub fn bind_row(&self, composer: &mut Composer, columns: &[Column], row: &Row) -> TabResult<()> {
        check_row(columns, row)?;
        let renderer = renderer_of(composer)?;
        let literals: Vec<String> = row.values().iter().map(|v| renderer.literal(v)).collect();
        composer.values(literals.join(", ").as_str());
        Ok(())
    }

    /// Render the INSERT statement for a single row.
    pub fn insert_sql(&self, columns: &[Column], row: &Row) -> TabResult<String> {
        let mut composer = self.insert_composer(columns)?;
        self.bind_row(&mut composer, columns, row)?;
        Ok(composer.render()?)
    }

    /// Drain `source` into batches of rendered INSERT statements.
    pub fn plan<S: RowSource + ?Sized>(&self, source: &mut S) -> TabResult<Vec<Vec<String>>> {
        let columns = source.columns().to_vec();
        let mut composer = self.insert_composer(&columns)?;
        let mut batches = Vec::new();
        let mut batch = Vec::with_capacity(self.config.batch_size);
        let mut index = 0usize;

        while let Some(row) = source.next_row()? {
            batch.push(self.render_row(&mut composer, &columns, &row, index)?);
            index += 1;
            if batch.len() == self.config.batch_size {
                batches.push(std::mem::replace(
                    &mut batch,
                    Vec::with_capacity(self.config.batch_size),
                ));
            }
        }
        if !batch.is_empty() {
            batches.push(batch);
        }
        Ok(batches)
    }

    /// Read every row from `source` and insert it through `conn`.
    ///
    /// Rows are rendered as they are read; each full batch is executed before
    /// more rows are pulled. The first failing row or batch aborts the import.
    pub async fn run<S, E>(&self, source: &mut S, conn: &E) -> TabResult<ImportReport>
    where
        S: RowSource + ?Sized,
        E: Executor,
    {
        let columns = source.columns().to_vec();
        let mut composer = self.insert_composer(&columns)?;
        let mut report = ImportReport::default();
        let mut batch = Vec::with_capacity(self.config.batch_size);

        while let Some(row) = source.next_row()? {
            batch.push(self.render_row(&mut composer, &columns, &row, report.rows)?);
            report.rows += 1;
            if batch.len() == self.config.batch_size {
                self.flush(conn, &mut batch, &mut report).await?;
            }
        }
        if !batch.is_empty() {
            self.flush(conn, &mut batch, &mut report).await?;
        }

        tracing::info!(
            target: "tabsql.import",
            table = %self.config.table,
            rows = report.rows,
            batches = report.batches,
            affected = report.affected,
            "import finished"
        );
        Ok(report)
    }

    async fn flush<E: Executor>(
        &self,
        conn: &E,
        batch: &mut Vec<String>,
        report: &mut ImportReport,
    ) -> TabResult<()> {
        let affected = conn.execute_batch(batch.as_slice()).await?;
        report.batches += 1;
        report.affected += affected;
        tracing::debug!(
            target: "tabsql.import",
            table = %self.config.table,
            batch = report.batches,
            statements = batch.len(),
            affected,
            "batch executed"
        );
        batch.clear();
        Ok(())
    }

    fn render_row(
        &self,
        composer: &mut Composer,
        columns: &[Column],
        row: &Row,
        index: usize,
    ) -> TabResult<String> {
        if let Err(e) = self.bind_row(composer, columns, row) {
            tracing::warn!(target: "tabsql.import", row = index, error = %e, "rejected row");
            return Err(match e {
                TabError::Validation(msg) => TabError::validation(format!("row {index}: {msg}")),
                other => other,
            });
        }
        Ok(composer.render()?)
    }

    /// Column names come from file headers and may contain dots, so they are
    /// quoted as one part.
    fn column_ident(&self, renderer: &dyn Renderer, name: &str) -> String {
        if self.config.quote_identifiers {
            renderer.quote_part(name)
        } else {
            name.to_string()
        }
    }

    fn table_ident(&self, renderer: &dyn Renderer) -> String {
        if self.config.quote_identifiers {
            renderer.quote_ident(&self.config.table)
        } else {
            self.config.table.clone()
        }
    }
}

fn renderer_of(composer: &Composer) -> TabResult<&dyn Renderer> {
    composer
        .renderer()
        .ok_or_else(|| ComposeError::UnsupportedDialect(composer.dialect()).into())
}
