use serde::{Deserialize, Serialize};

use crate::features::reception::models::{Counter, Ticket};

/// Persisted form of both registries.
///
/// `next_seq` is stored explicitly so numbering never reuses a value after a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionSnapshot {
    pub next_seq: u64,
    pub tickets: Vec<Ticket>,
    pub counters: Vec<Counter>,
}
