//! Per-mover statistics, recomputed on every query as a grouped subquery.
//!
//! One row per mover, zeros when it has no children. Listings join it under
//! [`STATS_ALIAS`] so statistics-backed orders resolve.

use pagination_core::STATS_ALIAS;
use pagination_db::{QualifiedColumn, QueryPlan};
use sea_orm::sea_query::{Alias, Condition, Expr, Func, JoinType, Query, SelectStatement, SimpleExpr};
use sea_orm::ActiveEnum;

use crate::infra::storage::entity::estimate_offer::{self, OfferStatus};
use crate::infra::storage::entity::{like, mover, review};

pub const REVIEW_COUNT: &str = "review_count";
pub const AVERAGE_RATING: &str = "average_rating";
pub const CONFIRMED_ESTIMATE_COUNT: &str = "confirmed_estimate_count";
pub const LIKE_COUNT: &str = "like_count";

pub const STATS_COLUMNS: [&str; 4] = [REVIEW_COUNT, AVERAGE_RATING, CONFIRMED_ESTIMATE_COUNT, LIKE_COUNT];

/// ```sql
/// SELECT m.id,
///        COUNT(DISTINCT r.id), CAST(COALESCE(AVG(r.rating), 0) AS DOUBLE PRECISION),
///        COUNT(DISTINCT o.id), COUNT(DISTINCT l.id)
/// FROM mover m
/// LEFT JOIN review r ON r.mover_id = m.id
/// LEFT JOIN estimate_offer o ON o.mover_id = m.id AND o.status = 'CONFIRMED'
/// LEFT JOIN "like" l ON l.mover_id = m.id
/// GROUP BY m.id
/// ```
///
/// Counts are over child ids: the three joins multiply rows, and counting
/// the mover id would collapse every count to 0 or 1. The average is
/// unaffected because every review row is repeated the same number of times.
pub fn mover_stats_view() -> SelectStatement {
    let m = Alias::new("m");
    let r = Alias::new("r");
    let o = Alias::new("o");
    let l = Alias::new("l");

    let average: SimpleExpr = Func::coalesce([
        SimpleExpr::from(Func::avg(Expr::col((r.clone(), review::Column::Rating)))),
        SimpleExpr::from(Expr::val(0.0f64)),
    ])
    .into();

    let mut q = Query::select();
    q.expr_as(Expr::col((m.clone(), mover::Column::Id)), Alias::new("id"))
        .expr_as(
            Func::count_distinct(Expr::col((r.clone(), review::Column::Id))),
            Alias::new(REVIEW_COUNT),
        )
        .expr_as(
            Func::cast_as(average, Alias::new("DOUBLE PRECISION")),
            Alias::new(AVERAGE_RATING),
        )
        .expr_as(
            Func::count_distinct(Expr::col((o.clone(), estimate_offer::Column::Id))),
            Alias::new(CONFIRMED_ESTIMATE_COUNT),
        )
        .expr_as(
            Func::count_distinct(Expr::col((l.clone(), like::Column::Id))),
            Alias::new(LIKE_COUNT),
        )
        .from_as(mover::Entity, m.clone())
        .join_as(
            JoinType::LeftJoin,
            review::Entity,
            r.clone(),
            Expr::col((r, review::Column::MoverId)).equals((m.clone(), mover::Column::Id)),
        )
        .join_as(
            JoinType::LeftJoin,
            estimate_offer::Entity,
            o.clone(),
            Condition::all()
                .add(
                    Expr::col((o.clone(), estimate_offer::Column::MoverId))
                        .equals((m.clone(), mover::Column::Id)),
                )
                .add(
                    Expr::col((o, estimate_offer::Column::Status))
                        .eq(OfferStatus::Confirmed.to_value()),
                ),
        )
        .join_as(
            JoinType::LeftJoin,
            like::Entity,
            l.clone(),
            Expr::col((l, like::Column::MoverId)).equals((m.clone(), mover::Column::Id)),
        )
        .group_by_col((m, mover::Column::Id));
    q
}

/// Left-join the statistics view under `stats` and select its columns.
pub fn join_mover_stats(plan: &mut QueryPlan) {
    let on = QueryPlan::columns_equal(
        &QualifiedColumn::new(STATS_ALIAS, "id"),
        &plan.base_column("id"),
    );
    plan.left_join_subquery(mover_stats_view(), STATS_ALIAS, on);
    plan.select_columns(STATS_ALIAS, STATS_COLUMNS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::SqliteQueryBuilder;

    #[test]
    fn test_view_counts_child_ids_and_filters_confirmed_offers() {
        let sql = mover_stats_view().to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#"COUNT(DISTINCT "r"."id") AS "review_count""#), "{sql}");
        assert!(sql.contains(r#"COUNT(DISTINCT "l"."id") AS "like_count""#), "{sql}");
        assert!(sql.contains(r#""o"."status" = 'CONFIRMED'"#), "{sql}");
        assert!(sql.contains(r#"LEFT JOIN "like" AS "l""#), "{sql}");
        assert!(sql.contains(r#"GROUP BY "m"."id""#), "{sql}");
    }

    #[test]
    fn test_join_registers_stats_alias() {
        let mut plan = QueryPlan::from_table(mover::Entity, "mover");
        assert!(!plan.is_joined(STATS_ALIAS));
        join_mover_stats(&mut plan);
        assert!(plan.is_joined(STATS_ALIAS));
    }
}
