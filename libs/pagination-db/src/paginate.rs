use pagination_core::{Cursor, CursorPage, CursorRow, Error, OrderSpec, PageRequest, SortDir};
use sea_orm::{ConnectionTrait, FromQueryResult};
use tracing::debug;

use crate::keyset::{cursor_after, keyset_condition, resolve_field_column};
use crate::plan::{QueryPlan, ID_COLUMN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitCfg {
    pub default: u64,
    pub max: u64,
}

impl Default for LimitCfg {
    fn default() -> Self {
        Self { default: 5, max: 50 }
    }
}

pub fn clamp_limit(req: Option<u64>, cfg: LimitCfg) -> u64 {
    let mut l = req.unwrap_or(cfg.default);
    if l == 0 {
        l = 1;
    }
    if l > cfg.max {
        l = cfg.max;
    }
    l
}

/// Validates the order → decodes the cursor → adds the keyset predicate →
/// orders by field then `id DESC` → fetches `take + 1` rows and trims.
///
/// When a cursor is supplied its embedded order wins over `req.order`, which
/// is still validated. The next cursor is built from the last kept row.
#[tracing::instrument(
    name = "pagination.paginate",
    skip_all,
    fields(order = %req.order, take = ?req.take, base = %plan.base_alias())
)]
pub async fn paginate<R, C>(
    plan: &mut QueryPlan,
    req: &PageRequest,
    conn: &C,
    limits: LimitCfg,
) -> Result<CursorPage<R>, Error>
where
    R: FromQueryResult + CursorRow + Send + Sync,
    C: ConnectionTrait + Send + Sync,
{
    let requested = OrderSpec::parse(&req.order)?;
    let cursor = req
        .cursor
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .map(Cursor::decode)
        .transpose()?;

    let order = match &cursor {
        Some(cursor) => {
            if cursor.order != requested {
                debug!(
                    requested = %requested,
                    pinned = %cursor.order,
                    "cursor order overrides requested order"
                );
            }
            cursor.order
        }
        None => requested,
    };

    let take = clamp_limit(req.take, limits);
    let column = resolve_field_column(plan, order.field)?;
    let id_column = plan.base_column(ID_COLUMN);

    if let Some(cursor) = &cursor {
        plan.and_where(keyset_condition(&column, &id_column, cursor));
    }
    plan.add_order_by(&column, order.dir)
        .add_order_by(&id_column, SortDir::Desc)
        .take(take + 1);

    let mut rows: Vec<R> = plan
        .fetch_all(conn)
        .await
        .map_err(|e| Error::Db(e.to_string()))?;

    let has_more = (rows.len() as u64) > take;
    if has_more {
        rows.truncate(take as usize);
    }

    let next_cursor = if has_more {
        rows.last()
            .map(|row| cursor_after(row, order).and_then(|c| c.encode()))
            .transpose()?
    } else {
        None
    };

    debug!(rows = rows.len(), has_next = has_more, "page fetched");
    Ok(CursorPage::new(rows, next_cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        let cfg = LimitCfg::default();
        assert_eq!(clamp_limit(None, cfg), 5);
        assert_eq!(clamp_limit(Some(0), cfg), 1);
        assert_eq!(clamp_limit(Some(12), cfg), 12);
        assert_eq!(clamp_limit(Some(500), cfg), 50);
        assert_eq!(clamp_limit(None, LimitCfg { default: 20, max: 10 }), 10);
    }
}
