//! Client and query-execution layer for HiveServer2-compatible analytic
//! SQL engines.
//!
//! A [`Connection`] turns table references and raw SQL into immutable
//! [`TableExpr`] handles, compiles them to engine SQL, and executes them
//! over an injectable [`Driver`], reconnecting transparently when the
//! engine drops the session. Result-set metadata comes back as a typed
//! [`Schema`]; rows come back as a [`ResultTable`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use quarry_client::{ClientResult, ConnectParams, Connection, Driver};
//!
//! # async fn demo(driver: Arc<dyn Driver>) -> ClientResult<()> {
//! let params = ConnectParams::new().host("warehouse.internal").port(21050);
//! let conn = Connection::connect(driver, params).await?;
//!
//! let orders = conn.table("orders", None).await?;
//! let preview = conn.execute(&orders.limit(20), None).await?;
//! println!("{} rows", preview.row_count());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod driver;
pub mod error;
pub mod expr;
pub mod plan;
pub mod result;
pub mod schema;

pub use client::Connection;
pub use driver::{ColumnDesc, ConnectParams, Cursor, Driver, DriverError, Row, Session};
pub use error::{ClientError, ClientResult};
pub use expr::TableExpr;
pub use plan::{
    build_plan, plan_with_default_limit, CompileContext, CreateTableAsSelect, DropTable,
    QueryPlan, ResultHandler, Select, Statement, StorageFormat,
};
pub use result::ResultTable;
pub use schema::{LogicalType, Schema};
