use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderName, HeaderValue},
    response::IntoResponse,
};
use receptterkep_engine::{AggregationEngine, Category, Recipe};
use serde::Serialize;

use super::{AppState, params::Params};
use crate::error::AppError;

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

#[derive(Debug, Serialize)]
pub struct RecipeList {
    pub count: usize,
    pub items: Vec<Recipe>,
    pub region_counts: BTreeMap<i64, usize>,
    pub settlement_counts: BTreeMap<i64, usize>,
}

/// GET /api/recipes
#[tracing::instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let request = Params::from(pairs).filter_request();
    let snapshot = crate::query::load_snapshot(&state.pool, &request).await?;
    let engine = state.engine.clone();

    let list = tokio::task::spawn_blocking(move || {
        let matched = engine.filter(&request, &snapshot.recipes, &snapshot.settlements);
        let aggregate = AggregationEngine::aggregate(&matched, &snapshot.settlements);

        RecipeList {
            count: aggregate.count,
            items: matched.into_iter().cloned().collect(),
            region_counts: aggregate.region_counts,
            settlement_counts: aggregate.settlement_counts,
        }
    })
    .await?;

    tracing::debug!(count = list.count, "Recipes matched");

    let total = HeaderValue::from(list.count);

    Ok(([(TOTAL_COUNT_HEADER, total)], Json(list)))
}

/// GET /api/recipes/categories
#[tracing::instrument(skip_all)]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    let categories = crate::query::query_categories(&state.pool).await?;

    Ok(Json(categories))
}
