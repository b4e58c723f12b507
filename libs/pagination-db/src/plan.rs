//! Mutable SELECT plan that listings build and the pagination engine finishes.
//!
//! Wraps a `sea_query::SelectStatement` and remembers which aliases have been
//! joined, so the engine can refuse statistics-backed orders on plans that
//! never joined the statistics view.

use std::fmt;

use pagination_core::SortDir;
use sea_orm::sea_query::{
    Alias, Condition, Expr, IntoCondition, IntoIden, JoinType, Order, Query, SelectStatement,
    SimpleExpr,
};
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};

/// Column name every listing's base table uses as its tie-break key.
pub const ID_COLUMN: &str = "id";

/// `<alias>.<column>` reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualifiedColumn {
    pub table: String,
    pub column: String,
}

impl QualifiedColumn {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn expr(&self) -> Expr {
        Expr::col((Alias::new(&self.table), Alias::new(&self.column)))
    }
}

impl fmt::Display for QualifiedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

#[derive(Clone, Debug)]
pub struct QueryPlan {
    stmt: SelectStatement,
    base_alias: String,
    base_columns: Vec<String>,
    joined: Vec<String>,
}

impl QueryPlan {
    /// `SELECT .. FROM <table> AS <alias>`
    pub fn from_table(table: impl IntoIden + 'static, alias: &str) -> Self {
        let mut stmt = Query::select();
        stmt.from_as(table, Alias::new(alias));
        Self {
            stmt,
            base_alias: alias.to_string(),
            base_columns: Vec::new(),
            joined: Vec::new(),
        }
    }

    pub fn base_alias(&self) -> &str {
        &self.base_alias
    }

    pub fn base_column(&self, column: &str) -> QualifiedColumn {
        QualifiedColumn::new(&self.base_alias, column)
    }

    /// Whether the base table exposes `column` to ordering. Plans that never
    /// selected base columns explicitly accept any column.
    pub fn has_base_column(&self, column: &str) -> bool {
        self.base_columns.is_empty() || self.base_columns.iter().any(|c| c == column)
    }

    pub fn is_joined(&self, alias: &str) -> bool {
        self.joined.iter().any(|a| a == alias)
    }

    pub fn joined_aliases(&self) -> &[String] {
        &self.joined
    }

    /// Select `<alias>.<column>` for each column, keeping the bare column name.
    pub fn select_columns<'a>(
        &mut self,
        alias: &str,
        columns: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        let is_base = alias == self.base_alias;
        for column in columns {
            self.stmt
                .expr_as(QualifiedColumn::new(alias, column).expr(), Alias::new(column));
            if is_base {
                self.base_columns.push(column.to_string());
            }
        }
        self
    }

    pub fn select_expr_as(&mut self, expr: impl Into<SimpleExpr>, name: &str) -> &mut Self {
        self.stmt.expr_as(expr, Alias::new(name));
        self
    }

    pub fn left_join_table(
        &mut self,
        table: impl IntoIden + 'static,
        alias: &str,
        on: impl IntoCondition,
    ) -> &mut Self {
        self.stmt
            .join_as(JoinType::LeftJoin, table, Alias::new(alias), on);
        self.joined.push(alias.to_string());
        self
    }

    pub fn inner_join_table(
        &mut self,
        table: impl IntoIden + 'static,
        alias: &str,
        on: impl IntoCondition,
    ) -> &mut Self {
        self.stmt
            .join_as(JoinType::InnerJoin, table, Alias::new(alias), on);
        self.joined.push(alias.to_string());
        self
    }

    pub fn left_join_subquery(
        &mut self,
        subquery: SelectStatement,
        alias: &str,
        on: impl IntoCondition,
    ) -> &mut Self {
        self.stmt
            .join_subquery(JoinType::LeftJoin, subquery, Alias::new(alias), on);
        self.joined.push(alias.to_string());
        self
    }

    /// AND-conjoins with whatever was added before.
    pub fn and_where(&mut self, cond: impl IntoCondition) -> &mut Self {
        self.stmt.cond_where(cond.into_condition());
        self
    }

    pub fn add_order_by(&mut self, column: &QualifiedColumn, dir: SortDir) -> &mut Self {
        let order = match dir {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };
        self.stmt.order_by(
            (Alias::new(&column.table), Alias::new(&column.column)),
            order,
        );
        self
    }

    pub fn take(&mut self, limit: u64) -> &mut Self {
        self.stmt.limit(limit);
        self
    }

    pub fn statement(&self) -> &SelectStatement {
        &self.stmt
    }

    pub fn build(&self, backend: DbBackend) -> Statement {
        backend.build(&self.stmt)
    }

    pub async fn fetch_all<T, C>(&self, conn: &C) -> Result<Vec<T>, DbErr>
    where
        T: FromQueryResult,
        C: ConnectionTrait,
    {
        let stmt = self.build(conn.get_database_backend());
        T::find_by_statement(stmt).all(conn).await
    }

    /// Number of rows the plan currently matches. Call before the plan is
    /// paginated; a cursor predicate or limit would otherwise be counted in.
    pub async fn count<C>(&self, conn: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut outer = Query::select();
        outer
            .expr_as(Expr::cust("COUNT(*)"), Alias::new("total"))
            .from_subquery(self.stmt.clone(), Alias::new("counted"));

        let stmt = conn.get_database_backend().build(&outer);
        let total: i64 = match conn.query_one(stmt).await? {
            Some(row) => row.try_get("", "total")?,
            None => 0,
        };
        Ok(u64::try_from(total).unwrap_or_default())
    }

    /// Condition helper: `<alias>.<column> = <other_alias>.<other_column>`.
    pub fn columns_equal(left: &QualifiedColumn, right: &QualifiedColumn) -> Condition {
        Condition::all().add(left.expr().equals((
            Alias::new(&right.table),
            Alias::new(&right.column),
        )))
    }
}
