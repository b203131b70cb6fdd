// crates/interaction/src/application/increment_read/increment_read_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::increment_read::IncrementReadCommand;
use crate::domain::repositories::InteractionRepository;

/// Lecture unitaire : Store, puis incrément du cache si la clé existe.
/// Pas de dédoublonnage par utilisateur, chaque appel compte.
pub struct IncrementReadUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl IncrementReadUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, command: IncrementReadCommand, deadline: Deadline) -> Result<()> {
        self.repo
            .inc_read(&command.domain, command.item_id, deadline)
            .await
    }
}
