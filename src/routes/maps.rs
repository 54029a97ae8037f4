use axum::{
    Json,
    extract::{Query, State},
};
use receptterkep_engine::{Region, Settlement};

use super::{AppState, params::Params};
use crate::error::AppError;

/// GET /api/maps/regions
#[tracing::instrument(skip_all)]
pub async fn regions(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Region>>, AppError> {
    let params = Params::from(pairs);
    let ids = params.set(&["regionId", "region_id"]);

    Ok(Json(crate::query::query_regions(&state.pool, &ids).await?))
}

/// GET /api/maps/settlements
#[tracing::instrument(skip_all)]
pub async fn settlements(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Settlement>>, AppError> {
    let params = Params::from(pairs);
    let ids = params.set(&["settlementId", "settlement_id"]);
    let region_ids = params.set(&["regionId", "region_id"]);

    let settlements =
        crate::query::query_settlements(&state.pool, &ids, &region_ids, true).await?;

    Ok(Json(settlements))
}
