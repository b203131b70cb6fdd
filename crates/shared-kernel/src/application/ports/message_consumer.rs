// crates/shared-kernel/src/application/ports/message_consumer.rs

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::application::Deadline;
use crate::errors::AppResult;

/// Message brut tiré du flux, avec sa position (topic / partition / offset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub payload: Vec<u8>,
}

/// Handler appliqué à un micro-batch d'événements décodés.
pub type BatchHandler<T> =
    Box<dyn Fn(Vec<T>, Deadline) -> BoxFuture<'static, AppResult<()>> + Send + Sync>;

/// Handler appliqué à un seul événement décodé.
pub type MessageHandler<T> =
    Box<dyn Fn(T, Deadline) -> BoxFuture<'static, AppResult<()>> + Send + Sync>;

#[async_trait]
pub trait MessageStream: Send + Sync {
    /// `None` signifie que le flux est fermé.
    async fn next_message(&self) -> AppResult<Option<IncomingMessage>>;

    /// Acquitte les messages (avance les offsets au-delà du dernier message).
    async fn commit(&self, messages: &[IncomingMessage]) -> AppResult<()>;

    /// Repositionne le flux sur le premier message non acquitté pour qu'il soit relivré.
    async fn rewind(&self, messages: &[IncomingMessage]) -> AppResult<()>;
}
