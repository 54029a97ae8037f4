use std::sync::Arc;

use axum::{Router, routing::get};
use receptterkep_engine::Engine;
use sqlx::SqlitePool;

mod health;
mod maps;
pub mod params;
mod recipes;
mod stats;

pub use recipes::TOTAL_COUNT_HEADER;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: &crate::config::Config, pool: SqlitePool) -> Self {
        Self {
            engine: Arc::new(Engine::new(config.engine.clone())),
            pool,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/recipes", get(recipes::index))
        .route("/api/recipes/categories", get(recipes::categories))
        .route("/api/maps/regions", get(maps::regions))
        .route("/api/maps/settlements", get(maps::settlements))
        .route("/api/stats/overview", get(stats::overview))
        .route("/api/stats/categories", get(stats::categories))
        .route("/api/stats/ingredients", get(stats::ingredients))
        .with_state(app_state)
}
