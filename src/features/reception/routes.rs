use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reception::handlers::reception_handler as handlers;
use crate::features::reception::services::ReceptionService;

/// Create routes for the reception feature
///
/// Note: staff identity comes from the deployment's auth gateway; these routes do not check credentials
pub fn routes(service: Arc<ReceptionService>) -> Router {
    Router::new()
        .route("/api/reception/categories", get(handlers::list_categories))
        .route(
            "/api/reception/tickets",
            get(handlers::list_tickets).post(handlers::issue_ticket),
        )
        .route("/api/reception/tickets/{number}", get(handlers::get_ticket))
        .route("/api/reception/queue", get(handlers::get_queue))
        .route("/api/reception/counters", get(handlers::list_counters))
        .route(
            "/api/reception/counters/{id}/call-next",
            post(handlers::call_next),
        )
        .route(
            "/api/reception/counters/{id}/finish",
            post(handlers::finish_service),
        )
        .route("/api/reception/stats", get(handlers::get_stats))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_server;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_issue_call_finish_round_trip() {
        let server = test_server().await;

        let response = server
            .post("/api/reception/tickets")
            .json(&json!({ "category": "protocolo" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["ticket"]["number"], "P001");
        assert_eq!(body["data"]["slip"]["categoryLabel"], "Protocolo");

        let response = server.post("/api/reception/counters/2/call-next").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["number"], "P001");
        assert_eq!(body["data"]["status"], "in_service");
        assert_eq!(body["data"]["counter"], 2);

        let counters: Value = server.get("/api/reception/counters").await.json();
        assert_eq!(counters["data"][1]["status"], "busy");
        assert_eq!(counters["data"][1]["currentTicket"], "P001");

        let response = server.post("/api/reception/counters/2/finish").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["number"], "P001");
        assert_eq!(body["data"]["status"], "served");
        assert_eq!(body["data"]["counter"], Value::Null);

        let ticket: Value = server.get("/api/reception/tickets/P001").await.json();
        assert_eq!(ticket["data"]["status"], "served");
    }

    #[tokio::test]
    async fn test_call_next_with_empty_queue_is_informational() {
        let server = test_server().await;

        let response = server.post("/api/reception/counters/1/call-next").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["message"], "No citizens waiting");
    }

    #[tokio::test]
    async fn test_fifo_across_categories_over_http() {
        let server = test_server().await;
        for category in ["protocolo", "certidao", "protocolo"] {
            server
                .post("/api/reception/tickets")
                .json(&json!({ "category": category }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let queue: Value = server.get("/api/reception/queue").await.json();
        assert_eq!(queue["meta"]["total"], 3);
        assert_eq!(queue["data"][0]["number"], "P001");
        assert_eq!(queue["data"][0]["isNext"], true);
        assert_eq!(queue["data"][1]["number"], "C002");

        let body: Value = server
            .post("/api/reception/counters/1/call-next")
            .await
            .json();
        assert_eq!(body["data"]["number"], "P001");
    }

    #[tokio::test]
    async fn test_state_errors_map_to_status_codes() {
        let server = test_server().await;
        server
            .post("/api/reception/tickets")
            .json(&json!({ "category": "alvara" }))
            .await;
        server
            .post("/api/reception/tickets")
            .json(&json!({ "category": "alvara" }))
            .await;

        server
            .post("/api/reception/counters/1/call-next")
            .await
            .assert_status_ok();
        server
            .post("/api/reception/counters/1/call-next")
            .await
            .assert_status(StatusCode::CONFLICT);
        server
            .post("/api/reception/counters/3/finish")
            .await
            .assert_status(StatusCode::CONFLICT);
        server
            .post("/api/reception/counters/42/call-next")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/reception/tickets/Z999")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let stats: Value = server.get("/api/reception/stats").await.json();
        assert_eq!(stats["data"]["waiting"], 1);
        assert_eq!(stats["data"]["inService"], 1);
        assert_eq!(stats["data"]["served"], 0);
        assert_eq!(stats["data"]["averageServiceMinutes"], Value::Null);
    }

    #[tokio::test]
    async fn test_issue_ticket_rejects_bad_input() {
        let server = test_server().await;

        let response = server
            .post("/api/reception/tickets")
            .json(&json!({ "category": "passaporte" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/reception/tickets")
            .json(&json!({ "category": "iptu", "citizenCpf": "123" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);

        let tickets: Value = server.get("/api/reception/tickets").await.json();
        assert_eq!(tickets["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_categories_catalogue() {
        let server = test_server().await;

        let body: Value = server.get("/api/reception/categories").await.json();
        let categories = body["data"].as_array().unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[3]["id"], "iptu");
        assert_eq!(categories[3]["prefix"], "I");
        assert_eq!(categories[3]["color"], "bg-amber-500");
    }
}
