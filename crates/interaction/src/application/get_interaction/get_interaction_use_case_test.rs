// crates/interaction/src/application/get_interaction/get_interaction_use_case_test.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::DomainError;
use std::time::Duration;

use crate::application::get_interaction::{GetInteractionCommand, GetInteractionUseCase};
use crate::application::like_item::{LikeItemCommand, LikeItemUseCase};
use crate::domain::repositories::InteractionStoreStub;
use crate::domain::value_objects::{BizDomain, InteractionCounts, ItemId};
use crate::utils::InteractionTestContext;

fn deadline() -> Deadline {
    Deadline::after(Duration::from_secs(1))
}

fn seeded() -> InteractionTestContext {
    InteractionTestContext::with(
        InteractionStoreStub::default().with_counts(
            &BizDomain::from_raw("article"),
            ItemId::from_raw(1),
            InteractionCounts::new(42, 0, 0),
        ),
        Default::default(),
    )
}

#[tokio::test]
async fn test_anonymous_view_has_counts_only() {
    let ctx = seeded();
    let use_case = GetInteractionUseCase::new(ctx.repo.clone());

    let view = use_case
        .execute(GetInteractionCommand::try_new("article", 1, None).unwrap(), deadline())
        .await
        .unwrap();

    assert_eq!(view.counts.read.value(), 42);
    assert!(!view.liked);
    assert!(!view.collected);
}

#[tokio::test]
async fn test_user_view_carries_like_state() {
    let ctx = seeded();
    LikeItemUseCase::new(ctx.repo.clone())
        .execute(LikeItemCommand::try_new("article", 1, 7).unwrap(), deadline())
        .await
        .unwrap();
    let use_case = GetInteractionUseCase::new(ctx.repo.clone());

    let view = use_case
        .execute(GetInteractionCommand::try_new("article", 1, Some(7)).unwrap(), deadline())
        .await
        .unwrap();

    assert!(view.liked);
    assert!(!view.collected);
    assert_eq!(view.counts.like.value(), 1);
}

#[tokio::test]
async fn test_missing_counter_is_not_found() {
    let ctx = InteractionTestContext::new();
    let use_case = GetInteractionUseCase::new(ctx.repo.clone());

    let result = use_case
        .execute(GetInteractionCommand::try_new("article", 404, Some(7)).unwrap(), deadline())
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[test]
fn test_command_validates_optional_user() {
    assert!(GetInteractionCommand::try_new("article", 1, Some(0)).is_err());
    assert!(GetInteractionCommand::try_new("article", 1, None).is_ok());
}
