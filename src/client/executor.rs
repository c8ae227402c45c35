//! Statement execution with transparent reconnects.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::driver::{ConnectParams, Cursor, Driver, Row, Session};
use crate::error::{ClientError, ClientResult};

/// Retries granted to each call unless overridden.
pub const DEFAULT_RETRIES: u32 = 3;

/// Owns the live driver session and re-dials it when the engine drops
/// the connection underneath us.
///
/// The session sits in a mutex slot: replacement on reconnect is atomic,
/// so no caller ever observes a half-replaced handle. Two callers racing
/// on a dead session may both reconnect; the duplicate dial is accepted
/// over losing the handle.
pub(crate) struct RetryingExecutor {
    driver: Arc<dyn Driver>,
    params: ConnectParams,
    session: Mutex<Box<dyn Session>>,
}

impl RetryingExecutor {
    pub(crate) async fn connect(
        driver: Arc<dyn Driver>,
        params: ConnectParams,
    ) -> ClientResult<Self> {
        let session = driver
            .connect(&params)
            .await
            .map_err(|source| ClientError::Connection { attempts: 1, source })?;
        Ok(Self {
            driver,
            params,
            session: Mutex::new(session),
        })
    }

    pub(crate) fn params(&self) -> &ConnectParams {
        &self.params
    }

    /// Execute `sql`, reconnecting on transient cursor-acquisition
    /// failures until the retry budget runs out.
    ///
    /// The budget covers cursor acquisition only: once a live cursor has
    /// accepted the statement, a failure is an engine-side error, and
    /// retrying it could double-execute side-effecting SQL.
    pub(crate) async fn execute(&self, sql: &str, retries: u32) -> ClientResult<Box<dyn Cursor>> {
        let mut remaining = retries;
        loop {
            let acquired = {
                let mut session = self.session.lock().await;
                session.cursor().await
            };
            match acquired {
                Ok(mut cursor) => {
                    debug!("submitting statement: {}", sql);
                    match cursor.execute(sql).await {
                        Ok(()) => return Ok(cursor),
                        Err(source) => return Err(ClientError::submission(source)),
                    }
                }
                Err(source) if source.is_transient() && remaining > 0 => {
                    remaining -= 1;
                    warn!(
                        "session lost, reconnecting ({} of {} retries left): {}",
                        remaining, retries, source
                    );
                    self.reconnect().await?;
                }
                Err(source) if source.is_transient() => {
                    return Err(ClientError::Connection {
                        attempts: retries + 1,
                        source,
                    });
                }
                Err(source) => return Err(ClientError::Driver(source)),
            }
        }
    }

    /// Execute and drain in one call.
    pub(crate) async fn fetch_all(&self, sql: &str, retries: u32) -> ClientResult<Vec<Row>> {
        let mut cursor = self.execute(sql, retries).await?;
        cursor.fetch_all().await.map_err(ClientError::submission)
    }

    async fn reconnect(&self) -> ClientResult<()> {
        let fresh = self
            .driver
            .connect(&self.params)
            .await
            .map_err(|source| ClientError::Connection { attempts: 1, source })?;
        *self.session.lock().await = fresh;
        Ok(())
    }
}
