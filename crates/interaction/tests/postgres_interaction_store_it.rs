// crates/interaction/tests/postgres_interaction_store_it.rs

mod common;

use interaction::domain::repositories::InteractionStore;
use interaction::domain::value_objects::{BizDomain, CollectionId, ItemId, UserId};
use shared_kernel::errors::DomainError;
use shared_kernel::infrastructure::retry::RetryConfig;
use std::sync::Arc;

fn article() -> BizDomain {
    BizDomain::from_raw("article")
}

#[tokio::test]
async fn test_read_upsert_creates_then_increments() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);
    let item = ItemId::from_raw(1);

    // 1. Ligne absente
    let missing = store.get(&article(), item).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));

    // 2. Création puis incréments
    for _ in 0..3 {
        store.inc_read(&article(), item).await.unwrap();
    }

    let counter = store.get(&article(), item).await.unwrap();
    assert_eq!(counter.counts().read.value(), 3);
    assert_eq!(counter.counts().like.value(), 0);
    assert!(counter.updated_at() >= counter.created_at());
}

#[tokio::test]
async fn test_like_toggle_is_idempotent() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);
    let (item, user) = (ItemId::from_raw(1), UserId::from_raw(7));

    assert!(store.inc_like(&article(), item, user).await.unwrap());
    assert!(!store.inc_like(&article(), item, user).await.unwrap());
    assert_eq!(store.get(&article(), item).await.unwrap().counts().like.value(), 1);
    assert!(store.get_like_info(&article(), item, user).await.unwrap().is_liked());

    assert!(store.dec_like(&article(), item, user).await.unwrap());
    assert!(!store.dec_like(&article(), item, user).await.unwrap());
    assert_eq!(store.get(&article(), item).await.unwrap().counts().like.value(), 0);

    // Le statut reste en base, à false
    assert!(!store.get_like_info(&article(), item, user).await.unwrap().is_liked());

    // Re-like après annulation
    assert!(store.inc_like(&article(), item, user).await.unwrap());
    assert_eq!(store.get(&article(), item).await.unwrap().counts().like.value(), 1);
}

#[tokio::test]
async fn test_unlike_without_like_changes_nothing() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);
    let item = ItemId::from_raw(1);

    store.inc_like(&article(), item, UserId::from_raw(1)).await.unwrap();
    let applied = store.dec_like(&article(), item, UserId::from_raw(2)).await.unwrap();

    assert!(!applied);
    assert_eq!(store.get(&article(), item).await.unwrap().counts().like.value(), 1);
    assert!(store.get_like_info(&article(), item, UserId::from_raw(2)).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_concurrent_likes_from_same_user_count_once() {
    let ctx = common::setup_postgres().await;
    // Marge de rejeu pour 10 premiers likes concurrents sur la même clé
    let store = Arc::new(common::store(&ctx).with_retry_config(RetryConfig {
        max_retries: 10,
        ..Default::default()
    }));
    let (item, user) = (ItemId::from_raw(1), UserId::from_raw(7));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move { store.inc_like(&article(), item, user).await }));
    }

    let mut applied = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            applied += 1;
        }
    }

    assert_eq!(applied, 1);
    assert_eq!(store.get(&article(), item).await.unwrap().counts().like.value(), 1);
}

#[tokio::test]
async fn test_concurrent_likes_from_distinct_users_all_count() {
    let ctx = common::setup_postgres().await;
    let store = Arc::new(common::store(&ctx));
    let item = ItemId::from_raw(1);

    let mut handles = Vec::new();
    for uid in 1..=20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.inc_like(&article(), item, UserId::from_raw(uid)).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    assert_eq!(store.get(&article(), item).await.unwrap().counts().like.value(), 20);
}

#[tokio::test]
async fn test_second_collect_is_a_conflict() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);
    let (item, user) = (ItemId::from_raw(20001), UserId::from_raw(321));

    store
        .inc_collect(&article(), item, user, CollectionId::default())
        .await
        .unwrap();
    let record = store.get_collect_info(&article(), item, user).await.unwrap();
    assert!(record.collection_id.is_default());

    let second = store.inc_collect(&article(), item, user, CollectionId::default()).await;

    assert!(matches!(second, Err(DomainError::AlreadyExists { field: "user_id", .. })));
    assert_eq!(store.get(&article(), item).await.unwrap().counts().collect.value(), 1);
}

#[tokio::test]
async fn test_dec_collect_removes_record() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);
    let (item, user) = (ItemId::from_raw(3), UserId::from_raw(9));

    assert!(!store.dec_collect(&article(), item, user).await.unwrap());

    store
        .inc_collect(&article(), item, user, CollectionId::from_raw(12))
        .await
        .unwrap();
    assert!(store.dec_collect(&article(), item, user).await.unwrap());

    assert_eq!(store.get(&article(), item).await.unwrap().counts().collect.value(), 0);
    assert!(store.get_collect_info(&article(), item, user).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_batch_inc_read_is_all_or_nothing() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);

    // Le 3e élément dépasse VARCHAR(128) : toute la transaction est annulée
    let oversized = BizDomain::from_raw("x".repeat(BizDomain::MAX_LENGTH + 1));
    let domains = vec![article(), article(), oversized, article()];
    let ids: Vec<ItemId> = (1..=4).map(ItemId::from_raw).collect();

    let result = store.batch_inc_read(&domains, &ids).await;
    assert!(result.is_err());

    for id in &ids {
        assert!(store.get(&article(), *id).await.unwrap_err().is_not_found());
    }

    // Le même batch sans l'élément fautif passe
    store
        .batch_inc_read(&[article(), article(), article()], &[ids[0], ids[1], ids[0]])
        .await
        .unwrap();
    assert_eq!(store.get(&article(), ids[0]).await.unwrap().counts().read.value(), 2);
}

#[tokio::test]
async fn test_batch_inc_read_rejects_mismatched_lengths() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);

    let result = store.batch_inc_read(&[article()], &[]).await;

    assert!(matches!(result, Err(DomainError::Validation { field: "ids", .. })));
}

#[tokio::test]
async fn test_get_by_ids_omits_missing_rows() {
    let ctx = common::setup_postgres().await;
    let store = common::store(&ctx);

    store.inc_read(&article(), ItemId::from_raw(1)).await.unwrap();
    store.inc_read(&article(), ItemId::from_raw(3)).await.unwrap();
    store.inc_read(&BizDomain::from_raw("video"), ItemId::from_raw(2)).await.unwrap();

    let ids: Vec<ItemId> = (1..=3).map(ItemId::from_raw).collect();
    let found = store.get_by_ids(&article(), &ids).await.unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.contains_key(&ItemId::from_raw(1)));
    assert!(!found.contains_key(&ItemId::from_raw(2)));
    assert!(store.get_by_ids(&article(), &[]).await.unwrap().is_empty());
}
