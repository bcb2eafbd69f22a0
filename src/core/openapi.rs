use utoipa::{Modify, OpenApi};

use crate::features::reception::{
    dtos as reception_dtos, handlers::reception_handler, models as reception_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        reception_handler::list_categories,
        reception_handler::issue_ticket,
        reception_handler::list_tickets,
        reception_handler::get_ticket,
        reception_handler::get_queue,
        reception_handler::list_counters,
        reception_handler::call_next,
        reception_handler::finish_service,
        reception_handler::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reception
            reception_models::ServiceCategory,
            reception_models::TicketStatus,
            reception_models::CounterStatus,
            reception_dtos::IssueTicketDto,
            reception_dtos::CategoryResponseDto,
            reception_dtos::TicketResponseDto,
            reception_dtos::TicketSlipDto,
            reception_dtos::IssuedTicketDto,
            reception_dtos::QueueEntryDto,
            reception_dtos::CounterResponseDto,
            reception_dtos::QueueStatsDto,
            ApiResponse<Vec<reception_dtos::CategoryResponseDto>>,
            ApiResponse<reception_dtos::IssuedTicketDto>,
            ApiResponse<Vec<reception_dtos::TicketResponseDto>>,
            ApiResponse<reception_dtos::TicketResponseDto>,
            ApiResponse<Vec<reception_dtos::QueueEntryDto>>,
            ApiResponse<Vec<reception_dtos::CounterResponseDto>>,
            ApiResponse<reception_dtos::QueueStatsDto>,
        )
    ),
    tags(
        (name = "reception", description = "Front-desk ticket queue and service counters"),
    ),
    info(
        title = "Cidade Online Reception API",
        version = "0.1.0",
        description = "Ticket queue and service counters for in-person service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_reception_paths() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Recepção".to_string(),
            version: "9.9.9".to_string(),
            description: "test".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Recepção");
        assert!(doc
            .paths
            .paths
            .contains_key("/api/reception/counters/{id}/call-next"));
        assert!(doc.paths.paths.contains_key("/api/reception/tickets"));
    }
}
