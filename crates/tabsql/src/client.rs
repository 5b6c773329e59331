//! Execution adapter: runs rendered SQL against a live connection.
//!
//! The composer never sees a connection. Callers render a [`Composer`] and
//! hand the text to an [`Executor`], or use the `*_composed` helpers which do
//! both.

use crate::compose::Composer;
use crate::error::TabResult;
use tokio_postgres::Row as PgRow;

/// A trait that unifies database clients and transactions.
pub trait Executor: Send + Sync {
    /// Run a query and return all rows.
    fn query(&self, sql: &str) -> impl std::future::Future<Output = TabResult<Vec<PgRow>>> + Send;

    /// Run a statement and return the number of affected rows.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = TabResult<u64>> + Send;

    /// Run statements in order and return the total affected row count.
    ///
    /// Stops at the first failing statement. The default implementation calls
    /// [`Executor::execute`] once per statement.
    fn execute_batch(
        &self,
        statements: &[String],
    ) -> impl std::future::Future<Output = TabResult<u64>> + Send {
        async move {
            let mut affected = 0;
            for sql in statements {
                affected += self.execute(sql).await?;
            }
            Ok(affected)
        }
    }

    /// Render `composer` and run it as a statement.
    fn execute_composed(
        &self,
        composer: &Composer,
    ) -> impl std::future::Future<Output = TabResult<u64>> + Send {
        async move {
            let sql = composer.render()?;
            self.execute(&sql).await
        }
    }

    /// Render `composer` and run it as a query.
    fn query_composed(
        &self,
        composer: &Composer,
    ) -> impl std::future::Future<Output = TabResult<Vec<PgRow>>> + Send {
        async move {
            let sql = composer.render()?;
            self.query(&sql).await
        }
    }
}

fn log_sql(sql: &str) {
    tracing::debug!(target: "tabsql.sql", len = sql.len(), sql = %sql, "executing");
}

impl Executor for tokio_postgres::Client {
    async fn query(&self, sql: &str) -> TabResult<Vec<PgRow>> {
        log_sql(sql);
        Ok(tokio_postgres::Client::query(self, sql, &[]).await?)
    }

    async fn execute(&self, sql: &str) -> TabResult<u64> {
        log_sql(sql);
        Ok(tokio_postgres::Client::execute(self, sql, &[]).await?)
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str) -> TabResult<Vec<PgRow>> {
        log_sql(sql);
        Ok(tokio_postgres::Transaction::query(self, sql, &[]).await?)
    }

    async fn execute(&self, sql: &str) -> TabResult<u64> {
        log_sql(sql);
        Ok(tokio_postgres::Transaction::execute(self, sql, &[]).await?)
    }
}
