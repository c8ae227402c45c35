//! Compilation of table expressions into executable plans.
//!
//! Compilation is pure: the same expression always yields the same plan,
//! and limit injection rewrites the expression and recompiles instead of
//! patching rendered SQL, so every derived query sees the same bound.

mod statement;

pub use statement::{
    CreateTableAsSelect, DropTable, ResultHandler, Select, Statement, StorageFormat,
};

use crate::expr::{TableExpr, TableNode};

/// Name-binding state shared across the statements of one plan. Derived
/// tables draw their aliases from here so nested subqueries never
/// collide.
#[derive(Debug, Clone, Default)]
pub struct CompileContext {
    next_alias: usize,
}

impl CompileContext {
    pub fn fresh_alias(&mut self) -> String {
        let alias = format!("t{}", self.next_alias);
        self.next_alias += 1;
        alias
    }
}

/// An ordered sequence of executable statements plus the context they
/// were compiled under. Built fresh per expression, discarded after
/// execution.
#[derive(Debug)]
pub struct QueryPlan {
    pub statements: Vec<Statement>,
    pub context: CompileContext,
}

/// Compile a table expression into an executable plan.
pub fn build_plan(expr: &TableExpr) -> QueryPlan {
    let mut context = CompileContext::default();
    let select = compile_table(expr, &mut context);
    QueryPlan {
        statements: vec![Statement::Select(select)],
        context,
    }
}

/// Compile, injecting `default_limit` when the expression does not bound
/// its own result.
///
/// Injection rewrites the expression with [`TableExpr::limit`] and
/// recompiles the whole plan. The effective expression is returned
/// alongside the plan so callers can report the query actually executed;
/// an already-bounded expression comes back untouched with no second
/// compilation.
pub fn plan_with_default_limit(
    expr: &TableExpr,
    default_limit: Option<u64>,
) -> (QueryPlan, TableExpr) {
    let plan = build_plan(expr);
    if let Some(rows) = default_limit {
        let unbounded = plan
            .statements
            .iter()
            .any(|s| matches!(s, Statement::Select(sel) if sel.limit().is_none()));
        if unbounded {
            let effective = expr.limit(rows);
            let plan = build_plan(&effective);
            return (plan, effective);
        }
    }
    (plan, expr.clone())
}

fn compile_table(expr: &TableExpr, context: &mut CompileContext) -> Select {
    match expr.node() {
        TableNode::DatabaseTable { name, .. } => Select::new(format!("SELECT * FROM {}", name)),
        TableNode::SqlQuery { query, .. } => Select::new(query.clone()),
        TableNode::Limit { child, rows } => {
            let inner = compile_table(child, context);
            match child.node() {
                // A plain table scan takes the bound directly.
                TableNode::DatabaseTable { .. } => inner.with_limit(*rows),
                // Raw SQL or an already-bounded child is wrapped in a
                // derived table: appending a second LIMIT to opaque query
                // text is not provably valid in any dialect.
                _ => {
                    let alias = context.fresh_alias();
                    Select::new(format!("SELECT * FROM (\n{}\n) {}", inner.compile(), alias))
                        .with_limit(*rows)
                }
            }
        }
    }
}
