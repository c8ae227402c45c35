//! Connection façade.
//!
//! [`Connection`] is the user-facing entry point: it resolves table
//! references and raw SQL into [`TableExpr`] handles, compiles and
//! executes expressions, and issues DDL derived from compiled plans.

pub(crate) mod executor;
mod probe;

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::driver::{ConnectParams, Cursor, Driver};
use crate::error::{ClientError, ClientResult};
use crate::expr::TableExpr;
use crate::plan::{
    build_plan, plan_with_default_limit, CreateTableAsSelect, DropTable, QueryPlan, Statement,
    StorageFormat,
};
use crate::result::ResultTable;

use executor::{RetryingExecutor, DEFAULT_RETRIES};

/// Handle to one logical engine session.
///
/// Cloning is cheap and clones share the underlying session. The design
/// assumes at most one in-flight execution per connection; callers that
/// share one across tasks serialize externally. A lost session is
/// replaced transparently on the next call, the `Connection` identity
/// never changes.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<RetryingExecutor>,
}

impl Connection {
    /// Dial the engine through `driver`. Parameters are handed to the
    /// driver verbatim and replayed on every reconnect.
    pub async fn connect(driver: Arc<dyn Driver>, params: ConnectParams) -> ClientResult<Self> {
        let executor = RetryingExecutor::connect(driver, params).await?;
        info!("connected to {}", executor.params().address());
        Ok(Self {
            inner: Arc::new(executor),
        })
    }

    /// Reference a table by name.
    ///
    /// Database qualification is not implemented; passing `Some(..)`
    /// fails rather than silently ignoring the qualifier.
    pub async fn table(&self, name: &str, database: Option<&str>) -> ClientResult<TableExpr> {
        if database.is_some() {
            return Err(ClientError::Unsupported(
                "database-qualified table lookup".to_string(),
            ));
        }
        let schema = probe::schema_from_probe(&self.inner, &probe::table_probe_sql(name)).await?;
        Ok(TableExpr::database_table(name, schema, self.clone()))
    }

    /// Wrap a raw SQL query as a table expression, discovering its result
    /// schema with a zero-row probe. The expression keeps the original
    /// query text; only the probe is rewritten.
    pub async fn sql(&self, query: &str) -> ClientResult<TableExpr> {
        let schema =
            probe::schema_from_probe(&self.inner, &probe::bound_to_zero_rows(query)).await?;
        Ok(TableExpr::sql_query(query, schema, self.clone()))
    }

    /// Compile and run `expr`, materializing the final result set.
    ///
    /// `default_limit` bounds whole-table results that carry no limit of
    /// their own; an expression that already bounds itself executes
    /// untouched.
    pub async fn execute(
        &self,
        expr: &TableExpr,
        default_limit: Option<u64>,
    ) -> ClientResult<ResultTable> {
        let (plan, _) = plan_with_default_limit(expr, default_limit);
        self.execute_plan(plan).await
    }

    /// Run every unit of an already-compiled plan in order, reporting the
    /// last result-producing unit. Earlier units execute purely for their
    /// side effects, e.g. temp-table setup.
    pub async fn execute_plan(&self, plan: QueryPlan) -> ClientResult<ResultTable> {
        let mut output = None;
        for statement in &plan.statements {
            let sql = statement.compile();
            let mut cursor = self.inner.execute(&sql, DEFAULT_RETRIES).await?;
            let result = materialize(cursor.as_mut()).await?;
            if let Statement::Select(select) = statement {
                output = Some(match select.result_handler() {
                    Some(handler) => handler(result),
                    None => result,
                });
            }
        }
        Ok(output.unwrap_or_else(ResultTable::empty))
    }

    /// Create `table_name` from the result of `expr`.
    ///
    /// Expressions compiling to more than one statement are not supported
    /// as a table body; callers pass single-result expressions.
    pub async fn create_table(
        &self,
        table_name: &str,
        expr: &TableExpr,
        database: Option<&str>,
        format: StorageFormat,
        overwrite: bool,
    ) -> ClientResult<()> {
        let plan = build_plan(expr);
        if plan.statements.len() != 1 {
            return Err(ClientError::Unsupported(
                "a multi-statement expression as a CREATE TABLE body".to_string(),
            ));
        }
        let select = match plan.statements.into_iter().next() {
            Some(Statement::Select(select)) => select,
            _ => {
                return Err(ClientError::Unsupported(
                    "a non-SELECT expression as a CREATE TABLE body".to_string(),
                ))
            }
        };
        let statement =
            CreateTableAsSelect::new(table_name, select, database.map(str::to_string), format, overwrite);
        info!("creating table {}", table_name);
        self.inner.execute(&statement.compile(), DEFAULT_RETRIES).await?;
        Ok(())
    }

    /// Drop `table_name`. With `must_exist = false` the statement carries
    /// an IF EXISTS guard, so an absent table is not an error.
    pub async fn drop_table(
        &self,
        table_name: &str,
        database: Option<&str>,
        must_exist: bool,
    ) -> ClientResult<()> {
        let statement = DropTable::new(table_name, database.map(str::to_string), must_exist);
        info!("dropping table {}", table_name);
        self.inner.execute(&statement.compile(), DEFAULT_RETRIES).await?;
        Ok(())
    }

    /// The parameters this connection was dialed with.
    pub fn params(&self) -> &ConnectParams {
        self.inner.params()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.params().host)
            .field("port", &self.params().port)
            .finish()
    }
}

/// Pull every row off a cursor into a result table.
async fn materialize(cursor: &mut dyn Cursor) -> ClientResult<ResultTable> {
    let rows = cursor.fetch_all().await.map_err(ClientError::submission)?;
    let columns = cursor
        .description()
        .iter()
        .map(|column| column.name.clone())
        .collect();
    Ok(ResultTable::new(columns, rows))
}
