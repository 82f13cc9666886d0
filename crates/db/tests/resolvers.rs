//! Integration tests for the location and product resolvers.
//!
//! Exercises the name-based lookups against a real database:
//! - Storable-only filtering (warehouse/view kinds are invisible)
//! - First-match-wins ordering on duplicate names
//! - Combined endpoint-pair resolution
//! - Warehouse fallback and default destination lookups

use sqlx::PgPool;
use stockmove_db::repositories::{LocationRepo, ProductRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_location(pool: &PgPool, name: &str, kind: &str, parent_id: Option<i64>) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO locations (name, kind, parent_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(kind)
    .bind(parent_id)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn seed_product(pool: &PgPool, name: &str, uom: &str) -> i64 {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO products (name, uom) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(uom)
            .fetch_one(pool)
            .await
            .unwrap();
    id
}

// ---------------------------------------------------------------------------
// Test: structural kinds never resolve
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn structural_kinds_are_not_storable(pool: PgPool) {
    seed_location(&pool, "Main", "warehouse", None).await;
    seed_location(&pool, "Virtual", "view", None).await;
    let shelf_id = seed_location(&pool, "Shelf-1", "storage", None).await;

    assert!(LocationRepo::find_storable_by_name(&pool, "Main")
        .await
        .unwrap()
        .is_none());
    assert!(LocationRepo::find_storable_by_name(&pool, "Virtual")
        .await
        .unwrap()
        .is_none());

    let shelf = LocationRepo::find_storable_by_name(&pool, "Shelf-1")
        .await
        .unwrap()
        .expect("storage location must resolve");
    assert_eq!(shelf.id, shelf_id);
}

// ---------------------------------------------------------------------------
// Test: duplicate names resolve to the lowest id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_names_resolve_first_match(pool: PgPool) {
    let first = seed_location(&pool, "Shelf", "storage", None).await;
    let _second = seed_location(&pool, "Shelf", "storage", None).await;

    let resolved = LocationRepo::find_storable_by_name(&pool, "Shelf")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, first);

    let p_first = seed_product(&pool, "Widget", "Unit").await;
    let _p_second = seed_product(&pool, "Widget", "Box").await;

    let product = ProductRepo::find_by_name(&pool, "Widget")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.id, p_first);
}

// ---------------------------------------------------------------------------
// Test: endpoint pair resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_pair_partitions_by_name(pool: PgPool) {
    let from_id = seed_location(&pool, "Shelf-1", "storage", None).await;
    let to_id = seed_location(&pool, "Shelf-2", "storage", None).await;

    let (from, to) = LocationRepo::resolve_pair(&pool, "Shelf-1", "Shelf-2")
        .await
        .unwrap();
    assert_eq!(from.unwrap().id, from_id);
    assert_eq!(to.unwrap().id, to_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_pair_with_identical_names(pool: PgPool) {
    let id = seed_location(&pool, "Shelf-1", "storage", None).await;

    let (from, to) = LocationRepo::resolve_pair(&pool, "Shelf-1", "Shelf-1")
        .await
        .unwrap();
    assert_eq!(from.unwrap().id, id);
    assert_eq!(to.unwrap().id, id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_pair_reports_each_missing_slot(pool: PgPool) {
    seed_location(&pool, "Shelf-1", "storage", None).await;

    let (from, to) = LocationRepo::resolve_pair(&pool, "Shelf-1", "Nowhere")
        .await
        .unwrap();
    assert!(from.is_some());
    assert!(to.is_none());
}

// ---------------------------------------------------------------------------
// Test: warehouse fallback and default destination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_warehouse_is_the_fallback(pool: PgPool) {
    assert!(LocationRepo::find_first_warehouse(&pool)
        .await
        .unwrap()
        .is_none());

    let first = seed_location(&pool, "WH-A", "warehouse", None).await;
    seed_location(&pool, "WH-B", "warehouse", None).await;

    let warehouse = LocationRepo::find_first_warehouse(&pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(warehouse.id, first);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn default_to_location_is_first_storable_child(pool: PgPool) {
    let warehouse = seed_location(&pool, "WH-A", "warehouse", None).await;
    // A view child must be skipped even when it has the lowest id.
    seed_location(&pool, "WH-A/Stock", "view", Some(warehouse)).await;
    let shelf = seed_location(&pool, "WH-A/Shelf-1", "storage", Some(warehouse)).await;
    seed_location(&pool, "WH-A/Shelf-2", "storage", Some(warehouse)).await;

    let default = LocationRepo::default_to_location(&pool, warehouse)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(default.id, shelf);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_storable_excludes_structural_kinds(pool: PgPool) {
    let warehouse = seed_location(&pool, "WH-A", "warehouse", None).await;
    seed_location(&pool, "Virtual", "view", None).await;
    seed_location(&pool, "Shelf-1", "storage", Some(warehouse)).await;
    seed_location(&pool, "Dock", "transit", Some(warehouse)).await;

    let storable = LocationRepo::list_storable(&pool).await.unwrap();
    let names: Vec<&str> = storable.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Dock", "Shelf-1"]); // ordered by name
}
