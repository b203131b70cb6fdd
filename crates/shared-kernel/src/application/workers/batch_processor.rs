// crates/shared-kernel/src/application/workers/batch_processor.rs

//! # BatchProcessor - Micro-batching d'un flux de messages
//!
//! Cycle par flux consommé : **Idle → Accumulating → Flushing → Idle**.
//!
//! - *Idle* : attente du premier message (aucun timer armé).
//! - *Accumulating* : les messages sont décodés (JSON) et empilés. Un message illisible est
//!   journalisé puis écarté sans interrompre le batch.
//! - *Flushing* : déclenché par `max_batch_size` OU par `max_wait` écoulé depuis le premier
//!   message du batch, selon ce qui arrive en premier. Succès du handler → commit de tous les
//!   offsets du batch. Échec → aucun offset n'avance, le flux est rembobiné et le batch entier
//!   sera relivré.
//!
//! La livraison est *at-least-once* : si le handler a réussi mais que le commit échoue, le batch
//! est rejoué et ses effets sont appliqués deux fois.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{BatchHandler, IncomingMessage, MessageStream};
use crate::application::Deadline;
use crate::errors::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub max_batch_size: usize,
    pub max_wait: Duration,
    /// Budget du handler pour un flush, indépendant de la deadline des appelants
    pub flush_timeout: Duration,
    pub retry_backoff: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 100,
            max_wait: Duration::from_secs(10),
            flush_timeout: Duration::from_secs(10),
            retry_backoff: Duration::from_secs(1),
        }
    }
}

impl BatchConfig {
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let config = Self {
            max_batch_size: std::env::var("READ_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_batch_size),
            max_wait: std::env::var("READ_BATCH_MAX_WAIT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_wait),
            flush_timeout: std::env::var("READ_BATCH_FLUSH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.flush_timeout),
            retry_backoff: std::env::var("READ_BATCH_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_backoff),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.max_batch_size == 0 {
            return Err(AppError::new(
                ErrorCode::ValidationFailed,
                "max_batch_size must be greater than zero",
            ));
        }
        if self.max_wait.is_zero() {
            return Err(AppError::new(
                ErrorCode::ValidationFailed,
                "max_wait must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Batch en cours d'accumulation : `messages` garde tout ce qui a été tiré du flux
/// (y compris les messages illisibles, pour qu'ils soient acquittés avec le reste).
struct PendingBatch<T> {
    messages: Vec<IncomingMessage>,
    events: Vec<T>,
}

impl<T: DeserializeOwned> PendingBatch<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Vec::with_capacity(capacity),
            events: Vec::with_capacity(capacity),
        }
    }

    fn accept(&mut self, message: IncomingMessage) {
        match serde_json::from_slice::<T>(&message.payload) {
            Ok(event) => self.events.push(event),
            Err(e) => tracing::warn!(
                topic = %message.topic,
                partition = message.partition,
                offset = message.offset,
                error = %e,
                "Dropping malformed message"
            ),
        }
        self.messages.push(message);
    }

    fn len(&self) -> usize {
        self.messages.len()
    }
}

pub struct BatchProcessor<T> {
    stream: Arc<dyn MessageStream>,
    handler: BatchHandler<T>,
    config: BatchConfig,
    shutdown_token: CancellationToken,
}

impl<T> BatchProcessor<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub fn new(
        stream: Arc<dyn MessageStream>,
        handler: BatchHandler<T>,
        config: BatchConfig,
    ) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            stream,
            handler,
            config,
            shutdown_token: CancellationToken::new(),
        })
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    pub fn stop(&self) {
        tracing::info!("Signaling batch processor to stop...");
        self.shutdown_token.cancel();
    }

    /// Boucle principale. Rend la main quand le flux se ferme ou sur arrêt demandé.
    pub async fn run(&self) -> AppResult<()> {
        tracing::info!(
            max_batch_size = self.config.max_batch_size,
            max_wait_ms = self.config.max_wait.as_millis() as u64,
            "Batch processor started"
        );

        loop {
            // 1. Idle : on attend le premier message sans timer
            let first = tokio::select! {
                biased;
                _ = self.shutdown_token.cancelled() => break,
                next = self.stream.next_message() => next,
            };

            let first = match first {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Stream receive error");
                    self.backoff().await;
                    continue;
                }
            };

            // 2. Accumulating : la fenêtre démarre avec le premier message
            let mut batch = PendingBatch::<T>::with_capacity(self.config.max_batch_size);
            batch.accept(first);

            let stopping = self.accumulate(&mut batch).await;

            // 3. Flushing. Un flux fermé est détecté au retour en Idle, après une
            // éventuelle relivraison du batch.
            self.flush(batch).await;

            if stopping {
                break;
            }
        }

        tracing::info!("Batch processor stopped");
        Ok(())
    }

    /// Retourne `true` si l'arrêt a été demandé pendant l'accumulation
    async fn accumulate(&self, batch: &mut PendingBatch<T>) -> bool {
        let window = tokio::time::sleep(self.config.max_wait);
        tokio::pin!(window);

        while batch.len() < self.config.max_batch_size {
            let next = tokio::select! {
                biased;
                _ = self.shutdown_token.cancelled() => return true,
                _ = &mut window => break,
                next = self.stream.next_message() => next,
            };

            match next {
                Ok(Some(message)) => batch.accept(message),
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(batch_size = batch.len(), error = %e, "Stream receive error");
                    // Backoff borné par la fenêtre du batch
                    tokio::select! {
                        biased;
                        _ = self.shutdown_token.cancelled() => return true,
                        _ = &mut window => break,
                        _ = tokio::time::sleep(self.config.retry_backoff) => {}
                    }
                }
            }
        }

        false
    }

    async fn flush(&self, batch: PendingBatch<T>) {
        let PendingBatch { messages, events } = batch;

        // Que des messages illisibles : rien à appliquer, on avance quand même
        if events.is_empty() {
            self.commit(&messages).await;
            return;
        }

        let count = events.len();
        let deadline = Deadline::after(self.config.flush_timeout);
        let outcome = tokio::time::timeout(self.config.flush_timeout, (self.handler)(events, deadline)).await;

        match outcome {
            Ok(Ok(())) => {
                tracing::info!(count, "Batch applied");
                self.commit(&messages).await;
            }
            Ok(Err(e)) => {
                tracing::error!(count, error = %e, "Batch flush failed, batch will be redelivered");
                self.redeliver(&messages).await;
            }
            Err(_) => {
                tracing::error!(count, "Batch flush timed out, batch will be redelivered");
                self.redeliver(&messages).await;
            }
        }
    }

    async fn commit(&self, messages: &[IncomingMessage]) {
        if let Err(e) = self.stream.commit(messages).await {
            // Les effets sont déjà appliqués : une relivraison sur-comptera
            tracing::error!(count = messages.len(), error = %e, "Offset commit failed");
        }
    }

    async fn redeliver(&self, messages: &[IncomingMessage]) {
        if let Err(e) = self.stream.rewind(messages).await {
            tracing::error!(count = messages.len(), error = %e, "Stream rewind failed");
        }
        self.backoff().await;
    }

    /// Interrompu par un arrêt demandé
    async fn backoff(&self) {
        tokio::select! {
            _ = self.shutdown_token.cancelled() => {}
            _ = tokio::time::sleep(self.config.retry_backoff) => {}
        }
    }
}
