// crates/interaction/src/application/increment_read/increment_read_use_case_test.rs

use shared_kernel::application::Deadline;
use std::time::Duration;

use crate::application::increment_read::{IncrementReadCommand, IncrementReadUseCase};
use crate::domain::value_objects::{BizDomain, ItemId};
use crate::utils::InteractionTestContext;

#[tokio::test]
async fn test_every_read_counts() {
    let ctx = InteractionTestContext::new();
    let use_case = IncrementReadUseCase::new(ctx.repo.clone());

    for _ in 0..3 {
        use_case
            .execute(
                IncrementReadCommand::try_new("article", 5).unwrap(),
                Deadline::after(Duration::from_secs(1)),
            )
            .await
            .unwrap();
    }

    let article = BizDomain::from_raw("article");
    assert_eq!(ctx.store.counts(&article, ItemId::from_raw(5)).unwrap().read.value(), 3);
    // Clé froide : le cache n'est pas créé par un incrément
    assert_eq!(ctx.cache.entry(&article, ItemId::from_raw(5)), None);
}
