//! Integration tests for file-backed cart persistence.
//!
//! Each "session" is a fresh `CartStore` over the same directory, the way a
//! restarted process would see it.

#![allow(clippy::unwrap_used)]

use rabbit_cart_core::ProductId;
use rabbit_cart_integration_tests::scratch_dir;
use tempfile::TempDir;
use rabbit_cart_storefront::cart::{CartStore, NewCartItem, hydration_gate};
use rabbit_cart_storefront::storage::{FileBackend, PersistenceBackend};
use rust_decimal::Decimal;

const KEY: &str = "cart-storage";

fn mug() -> NewCartItem {
    NewCartItem::new("p1", "Mug", Decimal::new(1200, 0), None).unwrap()
}

fn sticker() -> NewCartItem {
    NewCartItem::new(
        "p2",
        "Sticker",
        Decimal::new(300, 0),
        Some("https://cdn.example/sticker.png".to_owned()),
    )
    .unwrap()
}

async fn session(dir: &TempDir) -> CartStore<FileBackend> {
    CartStore::open(FileBackend::new(dir.path()), KEY).await
}

// =============================================================================
// Session Persistence
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = scratch_dir().unwrap();
    {
        let mut store = session(&dir).await;
        store.add_item(mug()).unwrap();
        store.add_item(mug()).unwrap();
        store.add_item(sticker()).unwrap();
    }

    let store = session(&dir).await;
    let ids: Vec<_> = store.items().iter().map(|l| l.product_id().as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(store.items()[0].quantity(), 2);
    assert_eq!(
        store.items()[1].image_url(),
        Some("https://cdn.example/sticker.png")
    );
    assert_eq!(store.total_amount(), Decimal::new(2700, 0));
}

#[tokio::test]
async fn test_clear_persists_empty_cart() {
    let dir = scratch_dir().unwrap();
    {
        let mut store = session(&dir).await;
        store.add_item(mug()).unwrap();
        store.clear_cart().unwrap();
    }

    let store = session(&dir).await;
    assert!(store.items().is_empty());

    let raw = std::fs::read(dir.path().join("cart-storage.json")).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(value["state"]["items"], serde_json::json!([]));
}

#[tokio::test]
async fn test_mug_scenario_across_sessions() {
    let dir = scratch_dir().unwrap();
    let id = ProductId::new("p1");

    session(&dir).await.add_item(mug()).unwrap();
    assert_eq!(session(&dir).await.total_amount(), Decimal::new(1200, 0));

    session(&dir).await.add_item(mug()).unwrap();
    assert_eq!(session(&dir).await.total_amount(), Decimal::new(2400, 0));

    session(&dir).await.update_quantity(&id, 0).unwrap();
    let store = session(&dir).await;
    assert!(store.items().is_empty());
    assert_eq!(store.total_amount(), Decimal::ZERO);
}

// =============================================================================
// Hydration Failure Modes
// =============================================================================

#[tokio::test]
async fn test_corrupt_file_hydrates_empty_and_is_overwritten() {
    let dir = scratch_dir().unwrap();
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(dir.path().join("cart-storage.json"), b"\x00\x01 not json").unwrap();

    let (gate, ready) = hydration_gate();
    let mut store = CartStore::hydrate(FileBackend::new(dir.path()), KEY, gate).await;
    assert!(ready.is_ready());
    assert!(store.items().is_empty());

    store.add_item(mug()).unwrap();
    assert_eq!(session(&dir).await.items().len(), 1);
}

#[tokio::test]
async fn test_browser_snapshot_hydrates() {
    let dir = scratch_dir().unwrap();
    let backend = FileBackend::new(dir.path());
    let snapshot = br#"{"state":{"items":[{"id":"p1","name":"Mug","price":1200,"quantity":3,"image_url":null}]},"version":0}"#;
    backend.save(KEY, snapshot).unwrap();

    let store = CartStore::open(backend, KEY).await;
    assert_eq!(store.item_count(), 3);
    assert_eq!(store.total_amount(), Decimal::new(3600, 0));
}

#[tokio::test]
async fn test_unwritable_directory_keeps_memory_state() {
    let dir = scratch_dir().unwrap();
    std::fs::create_dir_all(dir.path()).unwrap();
    // A file where the storage directory should be makes every write fail.
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"").unwrap();

    let mut store = CartStore::open(FileBackend::new(&blocked), KEY).await;
    assert!(store.add_item(mug()).is_err());
    assert_eq!(store.item_count(), 1);
}

// =============================================================================
// Independent Stores
// =============================================================================

#[tokio::test]
async fn test_two_stores_last_writer_wins() {
    let dir = scratch_dir().unwrap();
    let mut first = session(&dir).await;
    let mut second = session(&dir).await;

    first.add_item(mug()).unwrap();
    second.add_item(sticker()).unwrap();

    // Neither store sees the other's change.
    assert_eq!(first.items().len(), 1);
    assert_eq!(second.items().len(), 1);

    let reopened = session(&dir).await;
    assert_eq!(reopened.cart(), second.cart());

    first.add_item(mug()).unwrap();
    let reopened = session(&dir).await;
    assert_eq!(reopened.cart(), first.cart());
}

#[tokio::test]
async fn test_keys_are_isolated() {
    let dir = scratch_dir().unwrap();
    let mut guest = CartStore::open(FileBackend::new(dir.path()), "guest-cart").await;
    guest.add_item(mug()).unwrap();

    let member = CartStore::open(FileBackend::new(dir.path()), "member-cart").await;
    assert!(member.items().is_empty());
}
