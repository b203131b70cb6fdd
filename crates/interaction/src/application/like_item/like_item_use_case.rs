// crates/interaction/src/application/like_item/like_item_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::like_item::LikeItemCommand;
use crate::domain::repositories::InteractionRepository;

pub struct LikeItemUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl LikeItemUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    /// `true` si le like a été compté, `false` si l'utilisateur avait déjà liké
    pub async fn execute(&self, command: LikeItemCommand, deadline: Deadline) -> Result<bool> {
        let applied = self
            .repo
            .inc_like(&command.domain, command.item_id, command.user_id, deadline)
            .await?;

        if !applied {
            tracing::debug!(
                domain = %command.domain,
                item_id = %command.item_id,
                user_id = %command.user_id,
                "Item already liked, counter unchanged"
            );
        }

        Ok(applied)
    }
}
