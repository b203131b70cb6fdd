// crates/interaction/src/application/record_reads/record_reads_use_case_test.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::DomainError;

use crate::application::record_reads::{RecordReadsCommand, RecordReadsUseCase};
use crate::domain::events::ReadEvent;
use crate::domain::repositories::InteractionCacheStub;
use crate::domain::value_objects::{BizDomain, InteractionCounts, ItemId};
use crate::utils::InteractionTestContext;

fn article() -> BizDomain {
    BizDomain::from_raw("article")
}

fn events(item_ids: &[i64]) -> Vec<ReadEvent> {
    item_ids.iter().map(|id| ReadEvent::new(321, *id)).collect()
}

#[tokio::test]
async fn test_batch_counts_each_event() {
    let ctx = InteractionTestContext::new();
    let use_case = RecordReadsUseCase::new(ctx.repo.clone());

    let recorded = use_case
        .execute(RecordReadsCommand::new(article(), events(&[1, 2, 1, 1])), Deadline::unbounded())
        .await
        .unwrap();

    assert_eq!(recorded, 4);
    assert_eq!(ctx.store.counts(&article(), ItemId::from_raw(1)).unwrap().read.value(), 3);
    assert_eq!(ctx.store.counts(&article(), ItemId::from_raw(2)).unwrap().read.value(), 1);
}

#[tokio::test]
async fn test_failing_item_rolls_back_whole_batch() {
    // Arrange : l'item 3 (k = 3 sur n = 5) échoue
    let ctx = InteractionTestContext::new();
    ctx.store.fail_on_item(ItemId::from_raw(3));
    let use_case = RecordReadsUseCase::new(ctx.repo.clone());

    // Act
    let result = use_case
        .execute(RecordReadsCommand::new(article(), events(&[1, 2, 3, 4, 5])), Deadline::unbounded())
        .await;

    // Assert : aucun compteur n'a bougé
    assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    for id in 1..=5 {
        assert_eq!(ctx.store.counts(&article(), ItemId::from_raw(id)), None);
    }
}

#[tokio::test]
async fn test_invalid_item_ids_are_skipped() {
    let ctx = InteractionTestContext::new();
    let use_case = RecordReadsUseCase::new(ctx.repo.clone());

    let recorded = use_case
        .execute(RecordReadsCommand::new(article(), events(&[0, -4, 9])), Deadline::unbounded())
        .await
        .unwrap();

    assert_eq!(recorded, 1);
    assert_eq!(ctx.store.counts(&article(), ItemId::from_raw(9)).unwrap().read.value(), 1);
}

#[tokio::test]
async fn test_batch_does_not_touch_cache() {
    let warm = InteractionCounts::new(10, 0, 0);
    let ctx = InteractionTestContext::with(
        Default::default(),
        InteractionCacheStub::default().with_entry(&article(), ItemId::from_raw(1), warm),
    );
    let use_case = RecordReadsUseCase::new(ctx.repo.clone());

    use_case
        .execute(RecordReadsCommand::new(article(), events(&[1, 1])), Deadline::unbounded())
        .await
        .unwrap();

    assert_eq!(ctx.cache.entry(&article(), ItemId::from_raw(1)), Some(warm));
}
