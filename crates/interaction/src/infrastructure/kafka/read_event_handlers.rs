// crates/interaction/src/infrastructure/kafka/read_event_handlers.rs

//! Adaptateurs entre les workers génériques du kernel et les use cases de lecture.
//! Le domaine n'est pas dans l'événement : il est fixé par topic.

use shared_kernel::application::ports::{BatchHandler, MessageHandler};
use shared_kernel::errors::AppError;
use std::sync::Arc;

use crate::application::record_reads::{RecordReadsCommand, RecordReadsUseCase};
use crate::domain::events::ReadEvent;
use crate::domain::value_objects::BizDomain;

/// Un micro-batch = une transaction `batch_inc_read`
pub fn read_batch_handler(use_case: Arc<RecordReadsUseCase>, domain: BizDomain) -> BatchHandler<ReadEvent> {
    Box::new(move |events, deadline| {
        let use_case = use_case.clone();
        let command = RecordReadsCommand::new(domain.clone(), events);

        Box::pin(async move {
            use_case
                .execute(command, deadline)
                .await
                .map(|_| ())
                .map_err(AppError::from)
        })
    })
}

/// Variante unitaire : un événement, un incrément Store, un acquittement.
/// Store seul, comme le batch : une fois l'incrément commité, le message est acquitté.
pub fn read_event_handler(use_case: Arc<RecordReadsUseCase>, domain: BizDomain) -> MessageHandler<ReadEvent> {
    Box::new(move |event, deadline| {
        let use_case = use_case.clone();
        let command = RecordReadsCommand::new(domain.clone(), vec![event]);

        Box::pin(async move {
            use_case
                .execute(command, deadline)
                .await
                .map(|_| ())
                .map_err(AppError::from)
        })
    })
}
