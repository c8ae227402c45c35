//! Result-schema discovery via zero-row probes.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::client::executor::{RetryingExecutor, DEFAULT_RETRIES};
use crate::error::{ClientError, ClientResult};
use crate::schema::Schema;

/// Trailing row-bound clause, tolerant of case, spacing and a final
/// semicolon.
static TRAILING_LIMIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+LIMIT\s+\d+\s*;?\s*$").expect("limit pattern"));

/// Probe statement for a named table.
pub(crate) fn table_probe_sql(name: &str) -> String {
    format!("SELECT * FROM {} LIMIT 0", name)
}

/// Rewrite `query` so it returns no rows. An existing trailing LIMIT is
/// overridden, not stacked; two bounds is malformed SQL for most engines.
pub(crate) fn bound_to_zero_rows(query: &str) -> String {
    let stripped = TRAILING_LIMIT.replace(query.trim_end(), "");
    format!("{}\nLIMIT 0", stripped)
}

/// Run a probe statement and translate the cursor metadata into a
/// logical schema.
pub(crate) async fn schema_from_probe(
    executor: &RetryingExecutor,
    probe_sql: &str,
) -> ClientResult<Schema> {
    debug!("probing result schema: {}", probe_sql);
    let mut cursor = executor.execute(probe_sql, DEFAULT_RETRIES).await?;
    // Drain before touching metadata: some engines finalize the
    // server-side operation handle only after a full fetch, and a
    // half-open handle poisons the session for the next call.
    cursor
        .fetch_all()
        .await
        .map_err(|err| ClientError::SchemaProbe(format!("probe drain failed: {}", err)))?;
    Schema::from_descriptors(cursor.description())
}
