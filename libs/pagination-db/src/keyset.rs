use pagination_core::{
    Cursor, CursorRow, CursorValue, Error, FieldLocation, OrderField, OrderSpec, SortDir,
    STATS_ALIAS,
};
use sea_orm::sea_query::Condition;

use crate::plan::{QualifiedColumn, QueryPlan};

/// Column an order field sorts on in this plan.
///
/// Statistics fields live on the joined view; asking for one on a plan that
/// never joined it is a wiring mistake, not bad client input. A base field
/// the listing does not select (e.g. `move_date` on movers) is rejected as
/// an unsupported order.
pub fn resolve_field_column(plan: &QueryPlan, field: OrderField) -> Result<QualifiedColumn, Error> {
    match field.location() {
        FieldLocation::Base(column) => {
            if !plan.has_base_column(column) {
                return Err(Error::UnsupportedOrder(field.as_str().to_string()));
            }
            Ok(plan.base_column(column))
        }
        FieldLocation::Stats(column) => {
            if !plan.is_joined(STATS_ALIAS) {
                return Err(Error::StatsJoinMissing {
                    alias: STATS_ALIAS.to_string(),
                    field: field.as_str().to_string(),
                });
            }
            Ok(QualifiedColumn::new(STATS_ALIAS, column))
        }
    }
}

pub fn bind_value(value: &CursorValue) -> sea_orm::Value {
    match value {
        CursorValue::Integer(v) => (*v).into(),
        CursorValue::Float(v) => (*v).into(),
        CursorValue::Timestamp(v) => (*v).into(),
    }
}

/// `(col <op> v) OR (col = v AND id < cursor_id)`, `<op>` being `<` for
/// DESC and `>` for ASC. The id tie-break is always descending.
pub fn keyset_condition(
    column: &QualifiedColumn,
    id_column: &QualifiedColumn,
    cursor: &Cursor,
) -> Condition {
    let value = bind_value(&cursor.value);
    let beyond = match cursor.order.dir {
        SortDir::Desc => column.expr().lt(value.clone()),
        SortDir::Asc => column.expr().gt(value.clone()),
    };

    Condition::any().add(beyond).add(
        Condition::all()
            .add(column.expr().eq(value))
            .add(id_column.expr().lt(cursor.id.clone())),
    )
}

/// Cursor pointing just past `row` under `order`.
pub fn cursor_after<R: CursorRow>(row: &R, order: OrderSpec) -> Result<Cursor, Error> {
    let value = row
        .value_at(order.location())
        .ok_or_else(|| Error::MissingSortValue(order.field.as_str().to_string()))?;
    Ok(Cursor::new(row.cursor_id(), value, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{Alias, Query, SqliteQueryBuilder};

    #[test]
    fn test_stats_field_requires_join() {
        let plan = QueryPlan::from_table(Alias::new("mover"), "mover");
        assert_eq!(
            resolve_field_column(&plan, OrderField::ReviewCount),
            Err(Error::StatsJoinMissing {
                alias: "stats".into(),
                field: "review_count".into(),
            })
        );
        assert_eq!(
            resolve_field_column(&plan, OrderField::Experience).unwrap(),
            QualifiedColumn::new("mover", "experience")
        );
    }

    #[test]
    fn test_unselected_base_field_is_unsupported() {
        let mut plan = QueryPlan::from_table(Alias::new("mover"), "mover");
        plan.select_columns("mover", ["id", "experience", "created_at"]);
        assert!(resolve_field_column(&plan, OrderField::CreatedAt).is_ok());
        assert_eq!(
            resolve_field_column(&plan, OrderField::MoveDate),
            Err(Error::UnsupportedOrder("move_date".into()))
        );
    }

    #[test]
    fn test_keyset_condition_direction() {
        let column = QualifiedColumn::new("stats", "review_count");
        let id = QualifiedColumn::new("mover", "id");
        let desc = Cursor::new(
            "x",
            CursorValue::Integer(3),
            OrderSpec::new(OrderField::ReviewCount, SortDir::Desc),
        );
        let asc = Cursor::new(
            "x",
            CursorValue::Integer(3),
            OrderSpec::new(OrderField::ReviewCount, SortDir::Asc),
        );

        let render = |cursor: &Cursor| {
            Query::select()
                .column(Alias::new("id"))
                .from(Alias::new("mover"))
                .cond_where(keyset_condition(&column, &id, cursor))
                .to_string(SqliteQueryBuilder)
        };

        let sql = render(&desc);
        assert!(
            sql.contains(
                r#""stats"."review_count" < 3 OR ("stats"."review_count" = 3 AND "mover"."id" < 'x')"#
            ),
            "{sql}"
        );
        let sql = render(&asc);
        assert!(sql.contains(r#""stats"."review_count" > 3 OR"#), "{sql}");
    }

    struct Row(Option<i64>);

    impl CursorRow for Row {
        fn cursor_id(&self) -> String {
            "r-1".into()
        }
        fn base_value(&self, _column: &str) -> Option<CursorValue> {
            self.0.map(CursorValue::Integer)
        }
        fn stats_value(&self, _column: &str) -> Option<CursorValue> {
            None
        }
    }

    #[test]
    fn test_cursor_after_zero_is_a_value() {
        let order = OrderSpec::new(OrderField::Experience, SortDir::Desc);
        let cursor = cursor_after(&Row(Some(0)), order).unwrap();
        assert_eq!(cursor.value, CursorValue::Integer(0));
        assert_eq!(cursor.id, "r-1");

        assert_eq!(
            cursor_after(&Row(None), order),
            Err(Error::MissingSortValue("experience".into()))
        );
    }
}
