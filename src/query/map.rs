use std::collections::BTreeSet;

use receptterkep_db::table;
use receptterkep_engine::{Region, Settlement};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, FromRow)]
struct RegionRow {
    id: i64,
    name: Option<String>,
    geom: Option<String>,
}

#[derive(Debug, FromRow)]
struct SettlementRow {
    id: i64,
    name: Option<String>,
    region_id: Option<i64>,
    geom: Option<String>,
}

/// GeoJSON stored as text; unparseable geometry is served as null.
fn parse_geom(raw: Option<String>) -> Option<serde_json::Value> {
    let raw = raw?;

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid GeoJSON geometry");
            None
        }
    }
}

pub async fn query_regions(
    pool: &sqlx::SqlitePool,
    ids: &BTreeSet<i64>,
) -> Result<Vec<Region>, sqlx::Error> {
    let mut statment = Query::select()
        .columns([table::Region::Id, table::Region::Name, table::Region::Geom])
        .from(table::Region::Table)
        .order_by(table::Region::Id, Order::Asc)
        .to_owned();

    if !ids.is_empty() {
        statment.and_where(Expr::col(table::Region::Id).is_in(ids.iter().copied()));
    }

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, RegionRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| Region {
            id: row.id,
            name: row.name,
            geom: parse_geom(row.geom),
        })
        .collect())
}

/// Settlements, optionally restricted by id and by region.
///
/// `with_geom` off skips the geometry column, which the engine never needs.
pub async fn query_settlements(
    pool: &sqlx::SqlitePool,
    ids: &BTreeSet<i64>,
    region_ids: &BTreeSet<i64>,
    with_geom: bool,
) -> Result<Vec<Settlement>, sqlx::Error> {
    let mut statment = Query::select()
        .columns([
            table::Settlement::Id,
            table::Settlement::Name,
            table::Settlement::RegionId,
        ])
        .from(table::Settlement::Table)
        .order_by(table::Settlement::Id, Order::Asc)
        .to_owned();

    if with_geom {
        statment.column(table::Settlement::Geom);
    } else {
        statment.expr_as(Expr::cust("NULL"), table::Settlement::Geom);
    }

    if !ids.is_empty() {
        statment.and_where(Expr::col(table::Settlement::Id).is_in(ids.iter().copied()));
    }

    if !region_ids.is_empty() {
        statment.and_where(
            Expr::col(table::Settlement::RegionId).is_in(region_ids.iter().copied()),
        );
    }

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, SettlementRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| Settlement {
            id: row.id,
            name: row.name,
            region_id: row.region_id,
            geom: parse_geom(row.geom),
        })
        .collect())
}
