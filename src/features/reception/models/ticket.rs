use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reception::models::ServiceCategory;

/// Ticket status in the reception queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Waiting,
    InService,
    Served,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Waiting => write!(f, "waiting"),
            TicketStatus::InService => write!(f, "in_service"),
            TicketStatus::Served => write!(f, "served"),
        }
    }
}

/// Optional details about the citizen, captured when the ticket is issued
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenInfo {
    pub name: Option<String>,
    /// Formatted as `000.000.000-00`
    pub cpf: Option<String>,
}

/// A citizen's place in line.
///
/// `counter` is set iff `status == InService`. `arrival` is the queue order;
/// `issued_at` is for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub number: String,
    pub category: ServiceCategory,
    pub status: TicketStatus,
    pub counter: Option<u32>,
    pub arrival: u64,
    pub issued_at: DateTime<Utc>,
    pub called_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub citizen: CitizenInfo,
}

impl Ticket {
    pub fn is_waiting(&self) -> bool {
        self.status == TicketStatus::Waiting
    }

    /// Minutes between the call and the end of service, for served tickets
    pub fn service_minutes(&self) -> Option<f64> {
        match (self.called_at, self.served_at) {
            (Some(called), Some(served)) => {
                Some((served - called).num_milliseconds().max(0) as f64 / 60_000.0)
            }
            _ => None,
        }
    }
}
