// crates/interaction/src/application/record_reads/record_reads_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::record_reads::RecordReadsCommand;
use crate::domain::repositories::InteractionRepository;
use crate::domain::value_objects::ItemId;

pub struct RecordReadsUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl RecordReadsUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    /// Applique le batch en une transaction. Retourne le nombre de lectures comptées.
    pub async fn execute(&self, command: RecordReadsCommand, deadline: Deadline) -> Result<usize> {
        let RecordReadsCommand { domain, events } = command;

        let ids: Vec<ItemId> = events
            .iter()
            .filter_map(|event| match ItemId::try_new(event.item_id) {
                Ok(id) => Some(id),
                Err(e) => {
                    // Rejouer ce message ne le rendra pas valide : on l'écarte
                    tracing::warn!(
                        domain = %domain,
                        user_id = event.user_id,
                        item_id = event.item_id,
                        error = %e,
                        "Dropping read event with invalid item id"
                    );
                    None
                }
            })
            .collect();

        if ids.is_empty() {
            return Ok(0);
        }

        let domains = vec![domain; ids.len()];
        self.repo.batch_inc_read(&domains, &ids, deadline).await?;

        tracing::debug!(count = ids.len(), "Read batch recorded");
        Ok(ids.len())
    }
}
