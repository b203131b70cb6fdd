// crates/shared-kernel/src/application/workers/message_processor.rs

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{IncomingMessage, MessageHandler, MessageStream};
use crate::application::Deadline;
use crate::errors::AppResult;

/// Consommation message par message : chaque message est appliqué puis acquitté
/// individuellement. Un échec rembobine le flux sur ce message.
pub struct MessageProcessor<T> {
    stream: Arc<dyn MessageStream>,
    handler: MessageHandler<T>,
    handler_timeout: Duration,
    retry_backoff: Duration,
    shutdown_token: CancellationToken,
}

impl<T> MessageProcessor<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub fn new(
        stream: Arc<dyn MessageStream>,
        handler: MessageHandler<T>,
        handler_timeout: Duration,
        retry_backoff: Duration,
    ) -> Self {
        Self {
            stream,
            handler,
            handler_timeout,
            retry_backoff,
            shutdown_token: CancellationToken::new(),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    pub fn stop(&self) {
        tracing::info!("Signaling message processor to stop...");
        self.shutdown_token.cancel();
    }

    pub async fn run(&self) -> AppResult<()> {
        tracing::info!("Message processor started");

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown_token.cancelled() => break,
                next = self.stream.next_message() => next,
            };

            match next {
                Ok(Some(message)) => self.process(message).await,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Stream receive error");
                    self.backoff().await;
                }
            }
        }

        tracing::info!("Message processor stopped");
        Ok(())
    }

    async fn process(&self, message: IncomingMessage) {
        let event = match serde_json::from_slice::<T>(&message.payload) {
            Ok(event) => event,
            Err(e) => {
                // Poison message : on acquitte pour ne pas bloquer la partition
                tracing::warn!(
                    topic = %message.topic,
                    partition = message.partition,
                    offset = message.offset,
                    error = %e,
                    "Skipping malformed message"
                );
                self.commit(&message).await;
                return;
            }
        };

        let deadline = Deadline::after(self.handler_timeout);
        let outcome = tokio::time::timeout(self.handler_timeout, (self.handler)(event, deadline)).await;

        match outcome {
            Ok(Ok(())) => self.commit(&message).await,
            Ok(Err(e)) => {
                tracing::error!(offset = message.offset, error = %e, "Message handling failed");
                self.redeliver(&message).await;
            }
            Err(_) => {
                tracing::error!(offset = message.offset, "Message handling timed out");
                self.redeliver(&message).await;
            }
        }
    }

    async fn commit(&self, message: &IncomingMessage) {
        if let Err(e) = self.stream.commit(std::slice::from_ref(message)).await {
            tracing::error!(offset = message.offset, error = %e, "Offset commit failed");
        }
    }

    async fn redeliver(&self, message: &IncomingMessage) {
        if let Err(e) = self.stream.rewind(std::slice::from_ref(message)).await {
            tracing::error!(offset = message.offset, error = %e, "Stream rewind failed");
        }
        self.backoff().await;
    }

    async fn backoff(&self) {
        tokio::select! {
            _ = self.shutdown_token.cancelled() => {}
            _ = tokio::time::sleep(self.retry_backoff) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infrastructure::memory::InMemoryMessageStream;
    use futures_util::FutureExt;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Serialize, Deserialize)]
    struct Ping {
        n: u32,
    }

    fn processor(
        stream: InMemoryMessageStream,
        handler: MessageHandler<Ping>,
    ) -> MessageProcessor<Ping> {
        MessageProcessor::new(
            Arc::new(stream),
            handler,
            Duration::from_secs(5),
            Duration::from_millis(100),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_message_is_committed_after_handling() {
        let (stream, sender) = InMemoryMessageStream::channel("read_event");
        sender.send_json(&Ping { n: 1 });
        sender.send_raw(b"garbage".to_vec());
        sender.send_json(&Ping { n: 2 });
        sender.close();

        let seen: Arc<Mutex<Vec<u32>>> = Arc::default();
        let handler: MessageHandler<Ping> = Box::new({
            let seen = seen.clone();
            move |ping: Ping, _deadline| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(ping.n);
                    Ok(())
                }
                .boxed()
            }
        });

        processor(stream, handler).run().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
        assert_eq!(sender.commit_calls(), 3);
        assert_eq!(sender.committed_offsets(), vec![0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_redelivers_the_same_message() {
        let (stream, sender) = InMemoryMessageStream::channel("read_event");
        sender.send_json(&Ping { n: 9 });
        sender.close();

        let attempts = Arc::new(AtomicUsize::new(0));
        let handler: MessageHandler<Ping> = Box::new({
            let attempts = attempts.clone();
            move |_ping: Ping, _deadline| {
                let attempts = attempts.clone();
                async move {
                    if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                        return Err(AppError::internal("boom"));
                    }
                    Ok(())
                }
                .boxed()
            }
        });

        processor(stream, handler).run().await.unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(sender.committed_offsets(), vec![0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receive_error_backs_off_and_continues() {
        let (stream, sender) = InMemoryMessageStream::channel("read_event");
        sender.fail_next_receives(2);
        sender.send_json(&Ping { n: 1 });
        sender.close();

        let handled = Arc::new(AtomicUsize::new(0));
        let handler: MessageHandler<Ping> = Box::new({
            let handled = handled.clone();
            move |_ping: Ping, _deadline| {
                let handled = handled.clone();
                async move {
                    handled.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
                .boxed()
            }
        });

        processor(stream, handler).run().await.unwrap();

        assert_eq!(handled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_interrupts_redelivery_backoff() {
        let (stream, sender) = InMemoryMessageStream::channel("read_event");
        sender.send_json(&Ping { n: 1 });

        let handler: MessageHandler<Ping> = Box::new(|_ping: Ping, _deadline| {
            async { Err::<(), _>(AppError::internal("boom")) }.boxed()
        });
        let processor = Arc::new(MessageProcessor::new(
            Arc::new(stream),
            handler,
            Duration::from_secs(5),
            Duration::from_secs(60),
        ));
        let task = tokio::spawn({
            let processor = processor.clone();
            async move { processor.run().await }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        let stopped_at = tokio::time::Instant::now();
        processor.stop();
        task.await.unwrap().unwrap();

        assert!(tokio::time::Instant::now() - stopped_at < Duration::from_secs(1));
        assert!(sender.committed_offsets().is_empty());
    }
}
