use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use receptterkep::{AppState, migrate::run_migrations};
use receptterkep_engine::Engine;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tower::ServiceExt;

pub const REGION_A: i64 = 100;
pub const REGION_B: i64 = 200;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();

    pool
}

/// Two regions, one settlement each, two categories and three recipes.
///
/// Settlement 2 carries broken geometry on purpose.
pub async fn seed(pool: &SqlitePool) {
    for (id, name, geom) in [
        (REGION_A, "Csongrád-Csanád", r#"{"type":"Point","coordinates":[20.2,46.3]}"#),
        (REGION_B, "Baranya", r#"{"type":"Point","coordinates":[18.2,46.0]}"#),
    ] {
        sqlx::query("INSERT INTO region (id, name, geom) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(geom)
            .execute(pool)
            .await
            .unwrap();
    }

    for (id, name, region_id, geom) in [
        (1_i64, "Szentes", REGION_A, r#"{"type":"Point","coordinates":[20.3,46.6]}"#),
        (2, "Mohács", REGION_B, "not geojson"),
    ] {
        sqlx::query("INSERT INTO settlement (id, name, region_id, geom) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(region_id)
            .bind(geom)
            .execute(pool)
            .await
            .unwrap();
    }

    for (id, name) in [(10_i64, "Sütemények"), (11, "Levesek")] {
        sqlx::query("INSERT INTO category (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }

    for (url, year, settlement_id, category_id, text) in [
        ("https://receptek.localhost/r1/", 2020, 1_i64, 10_i64, "1 kg liszt|2 tojás"),
        ("https://receptek.localhost/r2/", 2021, 2, 10, "50g cukor"),
        ("https://receptek.localhost/r3/", 2021, 1, 11, "1 l víz|só|liszt"),
    ] {
        sqlx::query(
            "INSERT INTO recipe (url, title, year, settlement_id, category_id, ingredients_text) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(url)
        .bind(url.trim_end_matches('/').rsplit('/').next().unwrap_or_default())
        .bind(year)
        .bind(settlement_id)
        .bind(category_id)
        .bind(text)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub async fn create_test_app() -> Router {
    let pool = setup_test_db().await;
    seed(&pool).await;

    receptterkep::router(AppState {
        engine: Arc::new(Engine::default()),
        pool,
    })
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, headers, serde_json::from_slice(&body).unwrap())
}
