use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::reception::models::{
    Counter, CounterStatus, ServiceCategory, Ticket, TicketStatus,
};
use crate::features::reception::services::QueueStats;
use crate::shared::validation::validate_cpf;

/// Request DTO for issuing a ticket at the front desk
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueTicketDto {
    pub category: ServiceCategory,

    /// Optional citizen name
    #[validate(length(max = 120, message = "Citizen name must not exceed 120 characters"))]
    pub citizen_name: Option<String>,

    /// Optional CPF, raw digits or `000.000.000-00`
    #[validate(custom(function = "validate_cpf", message = "CPF must contain exactly 11 digits"))]
    pub citizen_cpf: Option<String>,
}

/// Entry of the category catalogue
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: ServiceCategory,
    pub label: String,
    pub prefix: String,
    pub color: String,
}

impl From<ServiceCategory> for CategoryResponseDto {
    fn from(c: ServiceCategory) -> Self {
        Self {
            id: c,
            label: c.label().to_string(),
            prefix: c.prefix().to_string(),
            color: c.color().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponseDto {
    pub number: String,
    pub category: ServiceCategory,
    pub category_label: String,
    pub status: TicketStatus,
    pub counter: Option<u32>,
    pub issued_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub called_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub served_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_name: Option<String>,
}

impl From<Ticket> for TicketResponseDto {
    fn from(t: Ticket) -> Self {
        Self {
            number: t.number,
            category: t.category,
            category_label: t.category.label().to_string(),
            status: t.status,
            counter: t.counter,
            issued_at: t.issued_at,
            called_at: t.called_at,
            served_at: t.served_at,
            citizen_name: t.citizen.name,
        }
    }
}

/// Waiting ticket with its position in line (1 = next to be called)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntryDto {
    pub position: usize,
    pub is_next: bool,
    pub number: String,
    pub category: ServiceCategory,
    pub color: String,
    pub issued_at: DateTime<Utc>,
}

impl QueueEntryDto {
    pub fn new(index: usize, ticket: &Ticket) -> Self {
        Self {
            position: index + 1,
            is_next: index == 0,
            number: ticket.number.clone(),
            category: ticket.category,
            color: ticket.category.color().to_string(),
            issued_at: ticket.issued_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterResponseDto {
    pub id: u32,
    pub attendant: String,
    pub status: CounterStatus,
    pub current_ticket: Option<String>,
}

impl From<Counter> for CounterResponseDto {
    fn from(c: Counter) -> Self {
        Self {
            id: c.id,
            attendant: c.attendant,
            status: c.status,
            current_ticket: c.current_ticket,
        }
    }
}

/// Data an external printer needs for the paper slip
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketSlipDto {
    pub municipality: String,
    pub category_label: String,
    pub number: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTicketDto {
    pub ticket: TicketResponseDto,
    pub slip: TicketSlipDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatsDto {
    pub waiting: usize,
    pub in_service: usize,
    pub served: usize,
    /// Mean of (served_at - called_at) over served tickets; null until one is served
    pub average_service_minutes: Option<f64>,
}

impl From<QueueStats> for QueueStatsDto {
    fn from(s: QueueStats) -> Self {
        Self {
            waiting: s.waiting,
            in_service: s.in_service,
            served: s.served,
            average_service_minutes: s.average_service_minutes,
        }
    }
}
