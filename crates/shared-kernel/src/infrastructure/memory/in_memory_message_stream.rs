// crates/shared-kernel/src/infrastructure/memory/in_memory_message_stream.rs

//! Flux en mémoire pour tester les workers sans broker.
//! Les offsets sont attribués séquentiellement sur une partition unique.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

use crate::application::ports::{IncomingMessage, MessageStream};
use crate::errors::{AppError, AppResult, ErrorCode};

#[derive(Default)]
struct State {
    queue: VecDeque<IncomingMessage>,
    next_offset: i64,
    closed: bool,
    committed: Vec<i64>,
    commit_calls: usize,
    failing_commits: usize,
    failing_receives: usize,
    rewind_on_commit_failure: bool,
}

struct Shared {
    topic: String,
    state: Mutex<State>,
    notify: Notify,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        // Un test qui panique ne doit pas en faire échouer d'autres en cascade
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct InMemoryMessageStream {
    shared: Arc<Shared>,
}

/// Côté producteur et inspection du flux
#[derive(Clone)]
pub struct InMemoryMessageSender {
    shared: Arc<Shared>,
}

impl InMemoryMessageStream {
    pub fn channel(topic: &str) -> (Self, InMemoryMessageSender) {
        let shared = Arc::new(Shared {
            topic: topic.to_string(),
            state: Mutex::new(State::default()),
            notify: Notify::new(),
        });

        (
            Self {
                shared: shared.clone(),
            },
            InMemoryMessageSender { shared },
        )
    }
}

impl InMemoryMessageSender {
    pub fn send_raw(&self, payload: Vec<u8>) {
        {
            let mut state = self.shared.state();
            let offset = state.next_offset;
            state.next_offset += 1;
            state.queue.push_back(IncomingMessage {
                topic: self.shared.topic.clone(),
                partition: 0,
                offset,
                payload,
            });
        }
        self.shared.notify.notify_waiters();
    }

    pub fn send_json<T: Serialize>(&self, value: &T) {
        let payload = serde_json::to_vec(value).unwrap_or_default();
        self.send_raw(payload);
    }

    /// Fin de flux : `next_message` rend `None` une fois la file vidée
    pub fn close(&self) {
        self.shared.state().closed = true;
        self.shared.notify.notify_waiters();
    }

    pub fn fail_next_commits(&self, count: usize) {
        self.shared.state().failing_commits = count;
    }

    /// Réveille aussi un `next_message` déjà en attente
    pub fn fail_next_receives(&self, count: usize) {
        self.shared.state().failing_receives = count;
        self.shared.notify.notify_waiters();
    }

    /// Simule un redémarrage après un commit raté : les messages sont relivrés
    pub fn rewind_on_commit_failure(&self) {
        self.shared.state().rewind_on_commit_failure = true;
    }

    pub fn committed_offsets(&self) -> Vec<i64> {
        let mut offsets = self.shared.state().committed.clone();
        offsets.sort_unstable();
        offsets.dedup();
        offsets
    }

    pub fn commit_calls(&self) -> usize {
        self.shared.state().commit_calls
    }
}

fn requeue(state: &mut State, messages: &[IncomingMessage]) {
    for message in messages.iter().rev() {
        state.queue.push_front(message.clone());
    }
}

#[async_trait]
impl MessageStream for InMemoryMessageStream {
    async fn next_message(&self) -> AppResult<Option<IncomingMessage>> {
        loop {
            let notified = self.shared.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.shared.state();
                if state.failing_receives > 0 {
                    state.failing_receives -= 1;
                    return Err(AppError::new(ErrorCode::ServiceUnavailable, "broker unavailable"));
                }
                if let Some(message) = state.queue.pop_front() {
                    return Ok(Some(message));
                }
                if state.closed {
                    return Ok(None);
                }
            }

            notified.await;
        }
    }

    async fn commit(&self, messages: &[IncomingMessage]) -> AppResult<()> {
        let mut state = self.shared.state();
        state.commit_calls += 1;

        if state.failing_commits > 0 {
            state.failing_commits -= 1;
            if state.rewind_on_commit_failure {
                requeue(&mut state, messages);
            }
            return Err(AppError::new(ErrorCode::InfrastructureFailure, "commit rejected"));
        }

        state.committed.extend(messages.iter().map(|m| m.offset));
        Ok(())
    }

    async fn rewind(&self, messages: &[IncomingMessage]) -> AppResult<()> {
        requeue(&mut self.shared.state(), messages);
        Ok(())
    }
}
