use thiserror::Error;

use crate::driver::DriverError;

/// Errors surfaced by the execution layer.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The driver session died and could not be re-established within the
    /// retry budget. Fatal for the call, not for the connection; the final
    /// driver failure is preserved as the cause.
    #[error("session lost and not re-established after {attempts} attempt(s): {source}")]
    Connection {
        attempts: u32,
        #[source]
        source: DriverError,
    },

    /// The engine rejected a submitted statement. Never retried.
    #[error("statement rejected by engine: {source}")]
    Sql {
        #[source]
        source: DriverError,
    },

    /// The driver reported a column type with no logical mapping.
    #[error("unsupported column type '{type_name}' for column '{column}'")]
    UnsupportedType { column: String, type_name: String },

    /// The caller requested functionality this layer does not implement.
    #[error("{0} is not supported")]
    Unsupported(String),

    /// A schema probe drained incorrectly or returned malformed metadata.
    #[error("schema probe failed: {0}")]
    SchemaProbe(String),

    /// A driver failure outside the SQL and session taxonomy, e.g. a
    /// protocol violation on a live cursor.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl ClientError {
    /// Classify a failure raised after a cursor was already acquired.
    pub(crate) fn submission(source: DriverError) -> Self {
        match source {
            DriverError::Sql(_) => ClientError::Sql { source },
            other => ClientError::Driver(other),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
