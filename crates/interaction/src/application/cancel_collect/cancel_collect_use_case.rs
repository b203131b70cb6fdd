// crates/interaction/src/application/cancel_collect/cancel_collect_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::cancel_collect::CancelCollectCommand;
use crate::domain::repositories::InteractionRepository;

pub struct CancelCollectUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl CancelCollectUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, command: CancelCollectCommand, deadline: Deadline) -> Result<bool> {
        self.repo
            .dec_collect(&command.domain, command.item_id, command.user_id, deadline)
            .await
    }
}
