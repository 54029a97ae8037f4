use std::collections::BTreeSet;

use receptterkep_db::table;
use receptterkep_engine::{Category, Recipe, collation};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, FromRow)]
struct RecipeRow {
    url: String,
    title: String,
    year: Option<i32>,
    settlement_id: Option<i64>,
    category_id: Option<i64>,
    ingredients_text: String,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            url: row.url,
            title: row.title,
            year: row.year,
            settlement_id: row.settlement_id,
            category_id: row.category_id,
            ingredients_text: row.ingredients_text,
        }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: Option<String>,
}

/// Candidate recipes for a request.
///
/// Years and categories narrow the read; every other predicate is applied by
/// the engine on the returned rows.
pub async fn query_recipes(
    pool: &sqlx::SqlitePool,
    years: &BTreeSet<i32>,
    category_ids: &BTreeSet<i64>,
) -> Result<Vec<Recipe>, sqlx::Error> {
    let mut statment = Query::select()
        .columns([
            table::Recipe::Url,
            table::Recipe::Title,
            table::Recipe::Year,
            table::Recipe::SettlementId,
            table::Recipe::CategoryId,
            table::Recipe::IngredientsText,
        ])
        .from(table::Recipe::Table)
        .order_by(table::Recipe::Url, Order::Asc)
        .to_owned();

    if !years.is_empty() {
        statment.and_where(Expr::col(table::Recipe::Year).is_in(years.iter().copied()));
    }

    if !category_ids.is_empty() {
        statment.and_where(
            Expr::col(table::Recipe::CategoryId).is_in(category_ids.iter().copied()),
        );
    }

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Every category, in Hungarian name order.
pub async fn query_categories(pool: &sqlx::SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    let statment = Query::select()
        .columns([table::Category::Id, table::Category::Name])
        .from(table::Category::Table)
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, CategoryRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut categories: Vec<Category> = rows
        .into_iter()
        .map(|row| Category {
            id: row.id,
            name: row.name,
        })
        .collect();

    categories.sort_by(|a, b| {
        collation::compare(&a.display_name(), &b.display_name()).then_with(|| a.id.cmp(&b.id))
    });

    Ok(categories)
}
