// crates/interaction/src/application/collect_item/collect_item_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::collect_item::CollectItemCommand;
use crate::domain::repositories::InteractionRepository;

pub struct CollectItemUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl CollectItemUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    /// Une collecte déjà présente remonte `DomainError::AlreadyExists`
    pub async fn execute(&self, command: CollectItemCommand, deadline: Deadline) -> Result<()> {
        self.repo
            .inc_collect(
                &command.domain,
                command.item_id,
                command.user_id,
                command.collection_id,
                deadline,
            )
            .await
    }
}
