//! HTTP-level integration tests for the read endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

async fn seed_compound(pool: &PgPool, name: &str, hidden: bool) {
    sqlx::query("INSERT INTO compound (compound_name, hidden) VALUES ($1, $2)")
        .bind(name)
        .bind(hidden)
        .execute(pool)
        .await
        .expect("compound seed should succeed");
}

async fn seed_kinase(pool: &PgPool, discoverx: &str, entrez: &str) {
    sqlx::query(
        "INSERT INTO kinase (discoverx_gene_symbol, entrez_gene_symbol) VALUES ($1, $2)",
    )
    .bind(discoverx)
    .bind(entrez)
    .execute(pool)
    .await
    .expect("kinase seed should succeed");
}

// ---------------------------------------------------------------------------
// Compounds
// ---------------------------------------------------------------------------

/// Unfiltered compound listings exclude hidden compounds.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_compounds_excludes_hidden(pool: PgPool) {
    seed_compound(&pool, "compoundA", false).await;
    seed_compound(&pool, "secret", true).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/api/compounds").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["compoundName"], "compoundA");
}

/// A name-prefix filter matches case-insensitively and may surface
/// hidden compounds.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_compounds_with_prefix_filter(pool: PgPool) {
    seed_compound(&pool, "compoundA", false).await;
    seed_compound(&pool, "compoundB", true).await;
    seed_compound(&pool, "other", false).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/api/compounds?name=COMP").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["compoundName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["compoundA", "compoundB"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_compound_by_name_is_case_insensitive(pool: PgPool) {
    seed_compound(&pool, "compoundA", false).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/api/compounds/COMPOUNDA").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["compoundName"], "compoundA");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_nonexistent_compound_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/api/compounds/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Kinases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_kinases_ordered_by_discoverx(pool: PgPool) {
    seed_kinase(&pool, "discoverxB", "entrezB").await;
    seed_kinase(&pool, "discoverxA", "entrezA").await;
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/api/kinases").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let symbols: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["discoverxGeneSymbol"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(symbols, vec!["discoverxA", "discoverxB"]);
}

// ---------------------------------------------------------------------------
// Activity profiles
// ---------------------------------------------------------------------------

/// Filtering the profile listing by a compound that does not exist is a
/// client error, not an empty result.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_activity_profiles_unknown_compound_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/api/activity-profiles?compound=missing").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_activity_profiles_filters_by_compound(pool: PgPool) {
    seed_compound(&pool, "compoundA", false).await;
    seed_compound(&pool, "compoundB", false).await;
    sqlx::query(
        "INSERT INTO activity_profile (compound_name, discoverx_gene_symbol, percent_control) \
         VALUES ('compoundA', 'discoverxA', 0.1), ('compoundB', 'discoverxB', 0.2)",
    )
    .execute(&pool)
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/api/activity-profiles?compound=compoundA").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["compoundName"], "compoundA");
}
