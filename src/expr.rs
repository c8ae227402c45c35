//! Logical table expressions.
//!
//! Expressions are immutable handles over shared nodes. Rewrites such as
//! [`TableExpr::limit`] allocate a new node and leave the receiver
//! untouched, so a rewritten expression can be recompiled while the
//! caller's original stays valid.

use std::fmt;
use std::sync::Arc;

use crate::client::Connection;
use crate::error::ClientResult;
use crate::result::ResultTable;
use crate::schema::Schema;

/// A table-valued expression bound to the connection that produced it.
#[derive(Clone)]
pub struct TableExpr {
    node: Arc<TableNode>,
}

pub(crate) enum TableNode {
    /// Direct reference to a named engine table.
    DatabaseTable {
        name: String,
        schema: Schema,
        connection: Connection,
    },
    /// The result set of a raw SQL query.
    SqlQuery {
        query: String,
        schema: Schema,
        connection: Connection,
    },
    /// A row-count bound over a child expression.
    Limit { child: TableExpr, rows: u64 },
}

impl TableExpr {
    pub(crate) fn database_table(name: &str, schema: Schema, connection: Connection) -> Self {
        Self::wrap(TableNode::DatabaseTable {
            name: name.to_string(),
            schema,
            connection,
        })
    }

    pub(crate) fn sql_query(query: &str, schema: Schema, connection: Connection) -> Self {
        Self::wrap(TableNode::SqlQuery {
            query: query.to_string(),
            schema,
            connection,
        })
    }

    fn wrap(node: TableNode) -> Self {
        Self { node: Arc::new(node) }
    }

    /// Bound the result to at most `rows` rows. Pure: returns a new
    /// expression, the receiver is unchanged.
    pub fn limit(&self, rows: u64) -> TableExpr {
        Self::wrap(TableNode::Limit {
            child: self.clone(),
            rows,
        })
    }

    /// The schema of the rows this expression produces.
    pub fn schema(&self) -> &Schema {
        match self.node.as_ref() {
            TableNode::DatabaseTable { schema, .. } | TableNode::SqlQuery { schema, .. } => schema,
            TableNode::Limit { child, .. } => child.schema(),
        }
    }

    /// The connection this expression executes against.
    pub fn connection(&self) -> &Connection {
        match self.node.as_ref() {
            TableNode::DatabaseTable { connection, .. }
            | TableNode::SqlQuery { connection, .. } => connection,
            TableNode::Limit { child, .. } => child.connection(),
        }
    }

    /// The outermost row bound, if this expression carries one.
    pub fn explicit_limit(&self) -> Option<u64> {
        match self.node.as_ref() {
            TableNode::Limit { rows, .. } => Some(*rows),
            _ => None,
        }
    }

    /// Execute through the owning connection with no default limit.
    pub async fn execute(&self) -> ClientResult<ResultTable> {
        self.connection().execute(self, None).await
    }

    pub(crate) fn node(&self) -> &TableNode {
        &self.node
    }
}

impl fmt::Debug for TableExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.as_ref() {
            TableNode::DatabaseTable { name, schema, .. } => f
                .debug_struct("DatabaseTable")
                .field("name", name)
                .field("columns", &schema.len())
                .finish(),
            TableNode::SqlQuery { query, schema, .. } => f
                .debug_struct("SqlQuery")
                .field("query", query)
                .field("columns", &schema.len())
                .finish(),
            TableNode::Limit { child, rows } => f
                .debug_struct("Limit")
                .field("rows", rows)
                .field("child", child)
                .finish(),
        }
    }
}
