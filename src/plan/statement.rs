use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::result::ResultTable;

/// Post-processing hook applied to a materialized SELECT result.
pub type ResultHandler = Arc<dyn Fn(ResultTable) -> ResultTable + Send + Sync>;

/// One executable unit of a compiled plan.
#[derive(Debug)]
pub enum Statement {
    Select(Select),
    CreateTableAsSelect(CreateTableAsSelect),
    DropTable(DropTable),
}

impl Statement {
    /// Render the unit to engine SQL.
    pub fn compile(&self) -> String {
        match self {
            Statement::Select(s) => s.compile(),
            Statement::CreateTableAsSelect(s) => s.compile(),
            Statement::DropTable(s) => s.compile(),
        }
    }

    /// True for units that produce a result set.
    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Statement::Select(s) => Some(s),
            _ => None,
        }
    }
}

/// A compiled SELECT with an optional row bound and result hook.
pub struct Select {
    body: String,
    limit: Option<u64>,
    result_handler: Option<ResultHandler>,
}

impl Select {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            limit: None,
            result_handler: None,
        }
    }

    pub fn with_limit(mut self, rows: u64) -> Self {
        self.limit = Some(rows);
        self
    }

    pub fn with_result_handler(mut self, handler: ResultHandler) -> Self {
        self.result_handler = Some(handler);
        self
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn result_handler(&self) -> Option<&ResultHandler> {
        self.result_handler.as_ref()
    }

    pub fn compile(&self) -> String {
        match self.limit {
            Some(rows) => format!("{}\nLIMIT {}", self.body, rows),
            None => self.body.clone(),
        }
    }
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("body", &self.body)
            .field("limit", &self.limit)
            .field("result_handler", &self.result_handler.is_some())
            .finish()
    }
}

/// Storage formats a created table can be materialized in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageFormat {
    #[default]
    Parquet,
    TextFile,
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageFormat::Parquet => write!(f, "PARQUET"),
            StorageFormat::TextFile => write!(f, "TEXTFILE"),
        }
    }
}

/// CREATE TABLE AS SELECT bound to a target name, storage format and
/// overwrite policy. Built once, compiled once, executed once.
#[derive(Debug)]
pub struct CreateTableAsSelect {
    table_name: String,
    database: Option<String>,
    format: StorageFormat,
    overwrite: bool,
    select: Select,
}

impl CreateTableAsSelect {
    pub fn new(
        table_name: &str,
        select: Select,
        database: Option<String>,
        format: StorageFormat,
        overwrite: bool,
    ) -> Self {
        Self {
            table_name: table_name.to_string(),
            database,
            format,
            overwrite,
            select,
        }
    }

    /// Without `overwrite` the statement carries an IF NOT EXISTS guard:
    /// an existing table is left alone rather than raised on.
    pub fn compile(&self) -> String {
        let guard = if self.overwrite { "" } else { "IF NOT EXISTS " };
        format!(
            "CREATE TABLE {}{} STORED AS {} AS\n{}",
            guard,
            scoped_name(&self.table_name, self.database.as_deref()),
            self.format,
            self.select.compile()
        )
    }
}

/// DROP TABLE over a target name with an explicit existence policy.
#[derive(Debug, Clone)]
pub struct DropTable {
    table_name: String,
    database: Option<String>,
    must_exist: bool,
}

impl DropTable {
    pub fn new(table_name: &str, database: Option<String>, must_exist: bool) -> Self {
        Self {
            table_name: table_name.to_string(),
            database,
            must_exist,
        }
    }

    /// With `must_exist = false` the statement text carries IF EXISTS so
    /// an absent table never raises; the guard is never inferred by
    /// catching the driver error.
    pub fn compile(&self) -> String {
        let guard = if self.must_exist { "" } else { "IF EXISTS " };
        format!(
            "DROP TABLE {}{}",
            guard,
            scoped_name(&self.table_name, self.database.as_deref())
        )
    }
}

fn scoped_name(table: &str, database: Option<&str>) -> String {
    match database {
        Some(db) => format!("{}.{}", db, table),
        None => table.to_string(),
    }
}
