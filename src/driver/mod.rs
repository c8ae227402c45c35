//! Driver boundary.
//!
//! The engine driver is an external collaborator: this crate hands it SQL
//! text and reads back rows and column metadata, nothing else crosses the
//! boundary. Implementations wrap whatever transport the engine speaks;
//! tests script the traits directly.

mod params;

pub use params::ConnectParams;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single result row as delivered by the driver.
pub type Row = Vec<Value>;

/// Column metadata reported by the driver after executing a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDesc {
    pub name: String,
    /// Engine type name, e.g. "bigint" or "DECIMAL".
    pub type_name: String,
    /// Decimal precision, when the engine reports one.
    pub precision: Option<u8>,
    /// Decimal scale, when the engine reports one.
    pub scale: Option<u8>,
    pub nullable: bool,
}

impl ColumnDesc {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            precision: None,
            scale: None,
            nullable: true,
        }
    }

    pub fn decimal(name: &str, precision: u8, scale: u8) -> Self {
        Self {
            precision: Some(precision),
            scale: Some(scale),
            ..Self::new(name, "decimal")
        }
    }
}

/// Errors raised at the driver boundary.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum DriverError {
    /// The session is dead or invalid; acquiring a cursor on it cannot
    /// succeed until the connection is re-established.
    #[error("session lost: {0}")]
    SessionLost(String),

    #[error("connect failed: {0}")]
    Connect(String),

    /// The engine parsed the statement and rejected it.
    #[error("SQL error: {0}")]
    Sql(String),

    #[error("protocol error: {0}")]
    Protocol(String),
}

impl DriverError {
    /// True for failures a reconnect can clear.
    pub fn is_transient(&self) -> bool {
        matches!(self, DriverError::SessionLost(_))
    }
}

/// Factory for engine sessions.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Open a fresh session. Parameters are passed through verbatim; this
    /// crate interprets none of them.
    async fn connect(&self, params: &ConnectParams) -> Result<Box<dyn Session>, DriverError>;
}

/// One live engine session.
#[async_trait]
pub trait Session: Send + Sync {
    /// Acquire a cursor. A dead session fails here with
    /// [`DriverError::SessionLost`].
    async fn cursor(&mut self) -> Result<Box<dyn Cursor>, DriverError>;
}

/// A server-side operation handle.
#[async_trait]
pub trait Cursor: Send + std::fmt::Debug {
    /// Submit SQL text for execution.
    async fn execute(&mut self, sql: &str) -> Result<(), DriverError>;

    /// Fetch every remaining row. Some engines finalize the server-side
    /// operation handle only once fully drained.
    async fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError>;

    /// Column metadata for the executed statement.
    fn description(&self) -> &[ColumnDesc];
}
