// crates/interaction/src/application/record_reads/record_reads_command.rs

use crate::domain::events::ReadEvent;
use crate::domain::value_objects::BizDomain;

/// Un micro-batch d'événements de lecture, tous du même domaine (fixé par topic)
#[derive(Debug, Clone)]
pub struct RecordReadsCommand {
    pub domain: BizDomain,
    pub events: Vec<ReadEvent>,
}

impl RecordReadsCommand {
    pub fn new(domain: BizDomain, events: Vec<ReadEvent>) -> Self {
        Self { domain, events }
    }
}
