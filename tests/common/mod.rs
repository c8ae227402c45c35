#![allow(dead_code)]

//! Scripted driver stubs for exercising the execution layer without an
//! engine.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quarry_client::{
    ColumnDesc, ConnectParams, Connection, Cursor, Driver, DriverError, Row, Session,
};

/// Shared observation log for one stub driver.
#[derive(Debug, Default)]
pub struct DriverLog {
    connects: AtomicU32,
    cursor_attempts: AtomicU32,
    fetches: AtomicU32,
    executed: Mutex<Vec<String>>,
}

impl DriverLog {
    pub fn connects(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn cursor_attempts(&self) -> u32 {
        self.cursor_attempts.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn last_executed(&self) -> Option<String> {
        self.executed.lock().unwrap().last().cloned()
    }
}

/// Driver whose first `dead_sessions` sessions refuse to hand out a
/// cursor with a transient failure. Everything it observes lands in the
/// shared [`DriverLog`].
pub struct StubDriver {
    log: Arc<DriverLog>,
    dead_sessions: u32,
    columns: Vec<ColumnDesc>,
    rows: Vec<Row>,
    fail_sql: Option<String>,
}

impl StubDriver {
    pub fn new() -> Self {
        Self {
            log: Arc::new(DriverLog::default()),
            dead_sessions: 0,
            columns: Vec::new(),
            rows: Vec::new(),
            fail_sql: None,
        }
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDesc>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// The first `count` sessions hand out no cursor.
    pub fn with_dead_sessions(mut self, count: u32) -> Self {
        self.dead_sessions = count;
        self
    }

    /// Statements containing `pattern` are rejected by the engine.
    pub fn with_sql_failure(mut self, pattern: &str) -> Self {
        self.fail_sql = Some(pattern.to_string());
        self
    }

    pub fn log(&self) -> Arc<DriverLog> {
        self.log.clone()
    }
}

#[async_trait]
impl Driver for StubDriver {
    async fn connect(&self, _params: &ConnectParams) -> Result<Box<dyn Session>, DriverError> {
        let index = self.log.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubSession {
            dead: index < self.dead_sessions,
            log: self.log.clone(),
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            fail_sql: self.fail_sql.clone(),
        }))
    }
}

struct StubSession {
    dead: bool,
    log: Arc<DriverLog>,
    columns: Vec<ColumnDesc>,
    rows: Vec<Row>,
    fail_sql: Option<String>,
}

#[async_trait]
impl Session for StubSession {
    async fn cursor(&mut self) -> Result<Box<dyn Cursor>, DriverError> {
        self.log.cursor_attempts.fetch_add(1, Ordering::SeqCst);
        if self.dead {
            return Err(DriverError::SessionLost("operation handle invalid".to_string()));
        }
        Ok(Box::new(StubCursor {
            log: self.log.clone(),
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            fail_sql: self.fail_sql.clone(),
            drained: false,
        }))
    }
}

#[derive(Debug)]
struct StubCursor {
    log: Arc<DriverLog>,
    columns: Vec<ColumnDesc>,
    rows: Vec<Row>,
    fail_sql: Option<String>,
    drained: bool,
}

#[async_trait]
impl Cursor for StubCursor {
    async fn execute(&mut self, sql: &str) -> Result<(), DriverError> {
        if let Some(pattern) = &self.fail_sql {
            if sql.contains(pattern.as_str()) {
                return Err(DriverError::Sql(format!("ParseException near '{}'", pattern)));
            }
        }
        self.log.executed.lock().unwrap().push(sql.to_string());
        Ok(())
    }

    async fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        self.log.fetches.fetch_add(1, Ordering::SeqCst);
        if self.drained {
            return Ok(Vec::new());
        }
        self.drained = true;
        Ok(self.rows.clone())
    }

    fn description(&self) -> &[ColumnDesc] {
        &self.columns
    }
}

/// Two plain columns, enough for most scenarios.
pub fn columns_ab() -> Vec<ColumnDesc> {
    vec![ColumnDesc::new("a", "int"), ColumnDesc::new("b", "string")]
}

pub async fn connect(stub: StubDriver) -> Connection {
    Connection::connect(Arc::new(stub) as Arc<dyn Driver>, ConnectParams::new())
        .await
        .expect("stub connect")
}
