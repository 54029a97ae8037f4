mod map;
mod recipe;

pub use map::*;
pub use recipe::*;

use receptterkep_engine::{Category, FilterRequest, Recipe, Region, Settlement};

/// Reference data and candidate recipes for one request.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub recipes: Vec<Recipe>,
    pub settlements: Vec<Settlement>,
    pub regions: Vec<Region>,
    pub categories: Vec<Category>,
}

pub async fn load_snapshot(
    pool: &sqlx::SqlitePool,
    request: &FilterRequest,
) -> Result<Snapshot, sqlx::Error> {
    let no_filter = Default::default();

    let (recipes, settlements, regions, categories) = tokio::try_join!(
        query_recipes(pool, &request.years, &request.category_ids),
        query_settlements(pool, &no_filter, &no_filter, false),
        query_regions(pool, &no_filter),
        query_categories(pool),
    )?;

    tracing::debug!(
        recipes = recipes.len(),
        settlements = settlements.len(),
        "Snapshot loaded"
    );

    Ok(Snapshot {
        recipes,
        settlements,
        regions,
        categories,
    })
}
