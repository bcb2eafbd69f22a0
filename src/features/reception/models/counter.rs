use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CounterStatus {
    Free,
    Busy,
}

impl std::fmt::Display for CounterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterStatus::Free => write!(f, "free"),
            CounterStatus::Busy => write!(f, "busy"),
        }
    }
}

/// A service window. `current_ticket` is set iff `status == Busy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub id: u32,
    pub attendant: String,
    pub status: CounterStatus,
    pub current_ticket: Option<String>,
}

impl Counter {
    pub fn new(id: u32, attendant: impl Into<String>) -> Self {
        Self {
            id,
            attendant: attendant.into(),
            status: CounterStatus::Free,
            current_ticket: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status == CounterStatus::Busy
    }
}
