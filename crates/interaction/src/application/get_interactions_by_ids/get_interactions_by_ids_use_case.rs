// crates/interaction/src/application/get_interactions_by_ids/get_interactions_by_ids_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::get_interactions_by_ids::GetInteractionsByIdsCommand;
use crate::domain::models::Interaction;
use crate::domain::repositories::InteractionRepository;
use crate::domain::value_objects::ItemId;

pub struct GetInteractionsByIdsUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl GetInteractionsByIdsUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    /// Un id absent du résultat signifie "aucune interaction pour l'instant"
    pub async fn execute(
        &self,
        command: GetInteractionsByIdsCommand,
        deadline: Deadline,
    ) -> Result<HashMap<ItemId, Interaction>> {
        if command.ids.is_empty() {
            return Ok(HashMap::new());
        }

        self.repo
            .get_by_ids(&command.domain, &command.ids, deadline)
            .await
    }
}
