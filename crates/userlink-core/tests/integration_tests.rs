//! Userlink Core Integration Tests

use userlink_core::{
    config::StoreConfig,
    mappings::MappingStore,
    storage::database::Database,
};

#[tokio::test]
async fn test_full_mapping_lifecycle() {
    let db = Database::in_memory()
        .await
        .expect("Failed to create in-memory database");
    let store = MappingStore::new(db.pool().clone());

    // Empty store
    assert!(store.load_all_identity_mappings().await.unwrap().is_empty());

    // Link one user on both paths
    store.save_identity_mapping(100, 55).await.unwrap();
    store.save_handle_mapping("@bob", 55).await.unwrap();

    assert_eq!(store.crm_user_id(100).await.unwrap(), Some(55));
    assert_eq!(store.crm_user_id_by_handle("bob").await.unwrap(), Some(55));

    let all = store.load_all_identity_mappings().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[&100], 55);

    // Unlink
    assert!(store.delete_identity_mapping(100).await.unwrap());
    assert_eq!(store.crm_user_id(100).await.unwrap(), None);
}

#[tokio::test]
async fn test_mappings_survive_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = StoreConfig::with_path(dir.path().join("mappings.db"));

    {
        let db = Database::open(&config).await.expect("Failed to open database");
        let store = MappingStore::new(db.pool().clone());

        store.save_identity_mapping(100, 55).await.unwrap();
        store.save_handle_mapping("@bob", 55).await.unwrap();

        db.close().await;
    }

    // A fresh Database over the same file sees everything
    let db = Database::open(&config).await.expect("Failed to reopen database");
    let store = MappingStore::new(db.pool().clone());

    assert_eq!(store.crm_user_id(100).await.unwrap(), Some(55));
    assert_eq!(store.crm_user_id_by_handle("@bob").await.unwrap(), Some(55));

    let all = store.load_all_identity_mappings().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[&100], 55);

    db.close().await;
}

#[tokio::test]
async fn test_warm_start_cache_population() {
    let db = Database::in_memory()
        .await
        .expect("Failed to create in-memory database");
    let store = MappingStore::new(db.pool().clone());

    for id in 1..=10 {
        store.save_identity_mapping(id, id * 100).await.unwrap();
    }

    // Callers warm their own cache from the snapshot
    let cache = store.load_all_identity_mappings().await.unwrap();
    assert_eq!(cache.len(), 10);
    for id in 1..=10 {
        assert_eq!(cache[&id], id * 100);
    }
}
