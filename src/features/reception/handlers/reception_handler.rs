use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reception::dtos::{
    CategoryResponseDto, CounterResponseDto, IssueTicketDto, IssuedTicketDto, QueueEntryDto,
    QueueStatsDto, TicketResponseDto,
};
use crate::features::reception::services::ReceptionService;
use crate::shared::constants::EMPTY_QUEUE_MESSAGE;
use crate::shared::types::{ApiResponse, Meta};

/// List service categories with their ticket prefix and display color
#[utoipa::path(
    get,
    path = "/api/reception/categories",
    responses(
        (status = 200, description = "Category catalogue", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "reception"
)]
pub async fn list_categories(
    State(service): State<Arc<ReceptionService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    Ok(Json(ApiResponse::success(
        Some(service.categories()),
        None,
        None,
    )))
}

/// Issue a new ticket
///
/// Returns the ticket and the data for its printed slip.
#[utoipa::path(
    post,
    path = "/api/reception/tickets",
    request_body = IssueTicketDto,
    responses(
        (status = 201, description = "Ticket issued", body = ApiResponse<IssuedTicketDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "reception"
)]
pub async fn issue_ticket(
    State(service): State<Arc<ReceptionService>>,
    AppJson(dto): AppJson<IssueTicketDto>,
) -> Result<(StatusCode, Json<ApiResponse<IssuedTicketDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let issued = service.issue_ticket(dto).await?;
    let message = format!("Ticket {} issued", issued.ticket.number);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(issued), Some(message), None)),
    ))
}

/// List every ticket issued, in arrival order
#[utoipa::path(
    get,
    path = "/api/reception/tickets",
    responses(
        (status = 200, description = "All tickets", body = ApiResponse<Vec<TicketResponseDto>>),
    ),
    tag = "reception"
)]
pub async fn list_tickets(
    State(service): State<Arc<ReceptionService>>,
) -> Result<Json<ApiResponse<Vec<TicketResponseDto>>>> {
    let tickets = service.list_tickets().await;
    let meta = Meta::total(tickets.len());
    Ok(Json(ApiResponse::success(Some(tickets), None, Some(meta))))
}

/// Get ticket by number
#[utoipa::path(
    get,
    path = "/api/reception/tickets/{number}",
    params(
        ("number" = String, Path, description = "Ticket number (e.g., P001)")
    ),
    responses(
        (status = 200, description = "Ticket found", body = ApiResponse<TicketResponseDto>),
        (status = 404, description = "Ticket not found")
    ),
    tag = "reception"
)]
pub async fn get_ticket(
    State(service): State<Arc<ReceptionService>>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    let ticket = service.get_ticket(&number).await?;
    Ok(Json(ApiResponse::success(Some(ticket), None, None)))
}

/// Waiting line in call order; the first entry is flagged as next
#[utoipa::path(
    get,
    path = "/api/reception/queue",
    responses(
        (status = 200, description = "Waiting tickets", body = ApiResponse<Vec<QueueEntryDto>>),
    ),
    tag = "reception"
)]
pub async fn get_queue(
    State(service): State<Arc<ReceptionService>>,
) -> Result<Json<ApiResponse<Vec<QueueEntryDto>>>> {
    let queue = service.waiting_queue().await;
    let meta = Meta::total(queue.len());
    Ok(Json(ApiResponse::success(Some(queue), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/reception/counters",
    responses(
        (status = 200, description = "Service counters", body = ApiResponse<Vec<CounterResponseDto>>),
    ),
    tag = "reception"
)]
pub async fn list_counters(
    State(service): State<Arc<ReceptionService>>,
) -> Result<Json<ApiResponse<Vec<CounterResponseDto>>>> {
    let counters = service.list_counters().await;
    Ok(Json(ApiResponse::success(Some(counters), None, None)))
}

/// Call the next waiting ticket to a counter
///
/// An empty queue is not an error: the response carries `data: null` and an
/// informational message.
#[utoipa::path(
    post,
    path = "/api/reception/counters/{id}/call-next",
    params(
        ("id" = u32, Path, description = "Counter ID")
    ),
    responses(
        (status = 200, description = "Ticket assigned, or nobody waiting", body = ApiResponse<TicketResponseDto>),
        (status = 404, description = "Counter not found"),
        (status = 409, description = "Counter is busy")
    ),
    tag = "reception"
)]
pub async fn call_next(
    State(service): State<Arc<ReceptionService>>,
    Path(id): Path<u32>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    let response = match service.call_next(id).await? {
        Some(ticket) => {
            let message = format!("Calling {} to counter {}", ticket.number, id);
            ApiResponse::success(Some(ticket), Some(message), None)
        }
        None => ApiResponse::success(None, Some(EMPTY_QUEUE_MESSAGE.to_string()), None),
    };
    Ok(Json(response))
}

/// Finish the service at a counter and free it
#[utoipa::path(
    post,
    path = "/api/reception/counters/{id}/finish",
    params(
        ("id" = u32, Path, description = "Counter ID")
    ),
    responses(
        (status = 200, description = "Service finished", body = ApiResponse<TicketResponseDto>),
        (status = 404, description = "Counter not found"),
        (status = 409, description = "Counter is not serving anyone")
    ),
    tag = "reception"
)]
pub async fn finish_service(
    State(service): State<Arc<ReceptionService>>,
    Path(id): Path<u32>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    let ticket = service.finish_service(id).await?;
    let message = format!("Ticket {} served", ticket.number);
    Ok(Json(ApiResponse::success(Some(ticket), Some(message), None)))
}

#[utoipa::path(
    get,
    path = "/api/reception/stats",
    responses(
        (status = 200, description = "Queue statistics", body = ApiResponse<QueueStatsDto>),
    ),
    tag = "reception"
)]
pub async fn get_stats(
    State(service): State<Arc<ReceptionService>>,
) -> Result<Json<ApiResponse<QueueStatsDto>>> {
    Ok(Json(ApiResponse::success(
        Some(service.stats().await),
        None,
        None,
    )))
}
