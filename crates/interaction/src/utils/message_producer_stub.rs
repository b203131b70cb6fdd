// crates/interaction/src/utils/message_producer_stub.rs

use async_trait::async_trait;
use shared_kernel::application::ports::{MessageProducer, OutgoingRecord};
use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MessageProducerStub {
    pub published: Mutex<Vec<(String, OutgoingRecord)>>,
    pub fail: AtomicBool,
}

impl MessageProducerStub {
    pub fn published(&self) -> Vec<(String, OutgoingRecord)> {
        self.published.lock().unwrap().clone()
    }

    fn check(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::InfrastructureFailure, "broker unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageProducer for MessageProducerStub {
    async fn publish(&self, topic: &str, record: &OutgoingRecord) -> AppResult<()> {
        self.check()?;
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), record.clone()));
        Ok(())
    }

    async fn publish_batch(&self, topic: &str, records: &[OutgoingRecord]) -> AppResult<()> {
        self.check()?;
        let mut published = self.published.lock().unwrap();
        for record in records {
            published.push((topic.to_string(), record.clone()));
        }
        Ok(())
    }
}
