//! Presentation statistics over the filtered recipe set
//!
//! Each handler loads a snapshot, then runs the whole engine pipeline on a
//! blocking thread.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use receptterkep_engine::{
    AggregationEngine, CategoryBox, CategoryBreakdownAggregator, CategoryCount, CategorySeries,
    HeatmapBinner, HeatmapScale, IngredientBucket, IngredientRanking, IngredientStatsAggregator,
    RegionBreakdown, RegionCount, YearCount,
};
use serde::Serialize;

use super::{AppState, params::Params};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct Overview {
    pub count: usize,
    pub region_counts: BTreeMap<i64, usize>,
    pub settlement_counts: BTreeMap<i64, usize>,
    pub heatmap: HeatmapScale,
    /// Color class per region, keyed like `region_counts`.
    pub region_classes: BTreeMap<i64, usize>,
    pub regions: Vec<RegionCount>,
    pub years: Vec<YearCount>,
}

#[derive(Debug, Serialize)]
pub struct CategoryStats {
    pub top: BTreeMap<i64, Vec<CategoryCount>>,
    pub totals: Vec<CategoryCount>,
    pub series: Vec<CategorySeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Vec<RegionBreakdown>>,
}

#[derive(Debug, Serialize)]
pub struct IngredientStats {
    pub boxes: Vec<CategoryBox>,
    #[serde(flatten)]
    pub ranking: IngredientRanking,
    pub extremes: Vec<IngredientBucket>,
}

/// GET /api/stats/overview
#[tracing::instrument(skip_all)]
pub async fn overview(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Overview>, AppError> {
    let request = Params::from(pairs).filter_request();
    let snapshot = crate::query::load_snapshot(&state.pool, &request).await?;
    let engine = state.engine.clone();

    let overview = tokio::task::spawn_blocking(move || {
        let matched = engine.filter(&request, &snapshot.recipes, &snapshot.settlements);
        let aggregate = AggregationEngine::aggregate(&matched, &snapshot.settlements);
        let heatmap = HeatmapBinner::compute_bins(
            aggregate.region_counts.values().copied(),
            engine.config().heatmap_classes,
        );

        Overview {
            count: aggregate.count,
            region_classes: heatmap.classify(&aggregate.region_counts),
            regions: AggregationEngine::region_rows(&aggregate.region_counts, &snapshot.regions),
            years: AggregationEngine::year_totals(&matched),
            heatmap,
            region_counts: aggregate.region_counts,
            settlement_counts: aggregate.settlement_counts,
        }
    })
    .await?;

    Ok(Json(overview))
}

/// GET /api/stats/categories
#[tracing::instrument(skip_all)]
pub async fn categories(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<CategoryStats>, AppError> {
    let params = Params::from(pairs);
    let request = params.filter_request();
    let top = params.first::<usize>(&["top"]);
    let compare = params.compare();

    let snapshot = crate::query::load_snapshot(&state.pool, &request).await?;
    let engine = state.engine.clone();

    let stats = tokio::task::spawn_blocking(move || {
        let matched = engine.filter(&request, &snapshot.recipes, &snapshot.settlements);
        let by_region = AggregationEngine::group_by_region(&matched, &snapshot.settlements);
        let k = top.unwrap_or(engine.config().top_categories);

        CategoryStats {
            top: CategoryBreakdownAggregator::top_categories(
                &by_region,
                &snapshot.categories,
                Some(k),
            ),
            totals: CategoryBreakdownAggregator::category_totals(&matched, &snapshot.categories),
            series: CategoryBreakdownAggregator::category_year_series(
                &matched,
                &snapshot.categories,
            ),
            comparison: compare.map(|(a, b)| {
                CategoryBreakdownAggregator::compare_regions(
                    &by_region,
                    &snapshot.regions,
                    &snapshot.categories,
                    a,
                    b,
                )
            }),
        }
    })
    .await?;

    Ok(Json(stats))
}

/// GET /api/stats/ingredients
#[tracing::instrument(skip_all)]
pub async fn ingredients(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<IngredientStats>, AppError> {
    let params = Params::from(pairs);
    let request = params.filter_request();
    let options = params.rank_options();

    let snapshot = crate::query::load_snapshot(&state.pool, &request).await?;
    let engine = state.engine.clone();

    let stats = tokio::task::spawn_blocking(move || {
        let matched = engine.filter(&request, &snapshot.recipes, &snapshot.settlements);
        let by_region = AggregationEngine::group_by_region(&matched, &snapshot.settlements);

        IngredientStats {
            boxes: IngredientStatsAggregator::category_boxes(
                &matched,
                engine.parser(),
                &snapshot.categories,
            ),
            ranking: IngredientStatsAggregator::rank_ingredients(
                &by_region,
                &snapshot.regions,
                engine.parser(),
                &options,
            ),
            extremes: IngredientStatsAggregator::ingredient_extremes(
                &matched,
                engine.parser(),
                &snapshot.settlements,
            ),
        }
    })
    .await?;

    Ok(Json(stats))
}
