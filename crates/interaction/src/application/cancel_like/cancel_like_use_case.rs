// crates/interaction/src/application/cancel_like/cancel_like_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::cancel_like::CancelLikeCommand;
use crate::domain::repositories::InteractionRepository;

pub struct CancelLikeUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl CancelLikeUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    /// Annuler un like absent n'est pas une erreur : on renvoie `false`
    pub async fn execute(&self, command: CancelLikeCommand, deadline: Deadline) -> Result<bool> {
        self.repo
            .dec_like(&command.domain, command.item_id, command.user_id, deadline)
            .await
    }
}
