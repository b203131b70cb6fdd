// crates/interaction/src/application/get_interaction/get_interaction_use_case.rs

use shared_kernel::application::Deadline;
use shared_kernel::errors::Result;
use std::sync::Arc;

use crate::application::get_interaction::GetInteractionCommand;
use crate::domain::models::Interaction;
use crate::domain::repositories::InteractionRepository;

pub struct GetInteractionUseCase {
    repo: Arc<dyn InteractionRepository>,
}

impl GetInteractionUseCase {
    pub fn new(repo: Arc<dyn InteractionRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, command: GetInteractionCommand, deadline: Deadline) -> Result<Interaction> {
        let GetInteractionCommand {
            domain,
            item_id,
            user_id,
        } = command;

        let Some(user_id) = user_id else {
            return self.repo.get(&domain, item_id, deadline).await;
        };

        // Compteurs et statuts utilisateur en parallèle, sous la même deadline
        let (interaction, liked, collected) = tokio::try_join!(
            self.repo.get(&domain, item_id, deadline),
            self.repo.get_like_info(&domain, item_id, user_id, deadline),
            self.repo.get_collect_info(&domain, item_id, user_id, deadline),
        )?;

        Ok(interaction.with_user_state(liked, collected))
    }
}
