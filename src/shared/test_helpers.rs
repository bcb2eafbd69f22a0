#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::core::config::ReceptionConfig;
#[cfg(test)]
use crate::features::reception::{
    dtos::IssueTicketDto, models::ServiceCategory, routes, InMemoryReceptionStore,
    ReceptionService,
};

#[cfg(test)]
pub fn reception_config() -> ReceptionConfig {
    ReceptionConfig {
        attendants: vec![
            "Maria Santos".to_string(),
            "João Silva".to_string(),
            "Ana Costa".to_string(),
        ],
        municipality: "Prefeitura Municipal".to_string(),
    }
}

#[cfg(test)]
pub fn issue_dto(category: ServiceCategory) -> IssueTicketDto {
    IssueTicketDto {
        category,
        citizen_name: None,
        citizen_cpf: None,
    }
}

/// Reception router over a fresh in-memory store with three counters
#[cfg(test)]
pub async fn test_server() -> axum_test::TestServer {
    let store = Arc::new(InMemoryReceptionStore::new());
    let service = ReceptionService::bootstrap(store, &reception_config())
        .await
        .unwrap();
    axum_test::TestServer::new(routes::routes(Arc::new(service))).unwrap()
}
