//! Comma-separated "flag" filter over a JSON object column.
//!
//! `"SEOUL,BUSAN"` matches rows whose column has `SEOUL: true` or
//! `BUSAN: true`. Empty input and input made only of separators is a no-op.

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Alias, Condition, Expr, Func, FunctionCall, SimpleExpr};
use sea_orm::DbBackend;

use crate::plan::QualifiedColumn;

/// Split on commas, trim each token and drop the empty ones.
pub fn parse_flag_keys(filter: Option<&str>) -> Vec<String> {
    filter
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/// OR of "`<key>` is true" over every key, or `None` when there are no keys.
pub fn compile_flag_filter(
    backend: DbBackend,
    filter: Option<&str>,
    column: &QualifiedColumn,
) -> Option<Condition> {
    let keys = parse_flag_keys(filter);
    if keys.is_empty() {
        return None;
    }

    let cond = keys.iter().fold(Condition::any(), |cond, key| {
        cond.add(flag_is_true(backend, column, key))
    });
    Some(cond)
}

fn flag_is_true(backend: DbBackend, column: &QualifiedColumn, key: &str) -> SimpleExpr {
    match backend {
        DbBackend::Postgres => {
            Expr::expr(column.expr().cast_json_field(key.to_string())).eq("true")
        }
        DbBackend::MySql => Expr::expr(json_extract("JSON_EXTRACT", column, key)).eq(true),
        DbBackend::Sqlite => Expr::expr(json_extract("json_extract", column, key)).eq(1),
    }
}

fn json_extract(func: &str, column: &QualifiedColumn, key: &str) -> FunctionCall {
    Func::cust(Alias::new(func))
        .arg(column.expr())
        .arg(json_path(key))
}

// `$."KEY"`; quotes inside a key would end the path label early.
fn json_path(key: &str) -> String {
    format!("$.\"{}\"", key.replace('"', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{Alias, PostgresQueryBuilder, Query, SqliteQueryBuilder};

    fn column() -> QualifiedColumn {
        QualifiedColumn::new("mover", "service_region")
    }

    #[test]
    fn test_parse_flag_keys_trims_and_drops_empty() {
        assert_eq!(parse_flag_keys(Some(" SEOUL , ,BUSAN,")), ["SEOUL", "BUSAN"]);
        assert!(parse_flag_keys(Some("")).is_empty());
        assert!(parse_flag_keys(Some(" , ,")).is_empty());
        assert!(parse_flag_keys(None).is_empty());
    }

    #[test]
    fn test_empty_filter_is_no_op() {
        for input in [None, Some(""), Some(","), Some("  ")] {
            assert!(compile_flag_filter(DbBackend::Sqlite, input, &column()).is_none());
        }
    }

    #[test]
    fn test_sqlite_keys_are_or_combined() {
        let cond = compile_flag_filter(DbBackend::Sqlite, Some("SEOUL,BUSAN"), &column())
            .expect("condition");
        let sql = Query::select()
            .column(Alias::new("id"))
            .from_as(Alias::new("mover"), Alias::new("mover"))
            .cond_where(cond)
            .to_string(SqliteQueryBuilder);

        assert!(
            sql.contains(r#"json_extract("mover"."service_region", '$."SEOUL"') = 1"#),
            "{sql}"
        );
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.contains(r#"'$."BUSAN"'"#), "{sql}");
    }

    #[test]
    fn test_postgres_uses_text_extraction() {
        let cond = compile_flag_filter(DbBackend::Postgres, Some("SMALL"), &column())
            .expect("condition");
        let sql = Query::select()
            .column(Alias::new("id"))
            .from_as(Alias::new("mover"), Alias::new("mover"))
            .cond_where(cond)
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""mover"."service_region" ->> 'SMALL'"#), "{sql}");
        assert!(sql.ends_with("= 'true'"), "{sql}");
    }

    #[test]
    fn test_sqlite_statement_binds_column_and_path() {
        let cond = compile_flag_filter(DbBackend::Sqlite, Some("SEOUL"), &column())
            .expect("condition");
        let mut select = Query::select();
        select
            .column(Alias::new("id"))
            .from_as(Alias::new("mover"), Alias::new("mover"))
            .cond_where(
                Condition::all()
                    .add(Expr::col((Alias::new("mover"), Alias::new("status"))).eq("CONFIRMED"))
                    .add(cond),
            );
        let stmt = DbBackend::Sqlite.build(&select);

        assert!(
            stmt.sql
                .contains(r#"json_extract("mover"."service_region", ?) = ?"#),
            "{}",
            stmt.sql
        );
        assert!(!stmt.sql.contains('$'), "{}", stmt.sql);
        let values = stmt.values.expect("bound values").0;
        assert_eq!(values.len(), 3, "{values:?}");
        assert_eq!(values[1], sea_orm::Value::from(r#"$."SEOUL""#));
    }

    #[test]
    fn test_json_path_strips_quotes() {
        assert_eq!(json_path(r#"SE"OUL"#), r#"$."SEOUL""#);
    }
}
