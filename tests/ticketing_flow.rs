//! Integration tests for the ticketing endpoints using wiremock.
//!
//! - POST /v2/ticketing/ticket      : create_ticket
//! - GET  /v2/ticketing/ticket/{id} : get_ticket
//! - PUT  /v2/ticketing/ticket/{id} : update_ticket

use ninjarmm::activities::{Priority, Severity};
use ninjarmm::auth::TokenProvider;
use ninjarmm::client::RmmClient;
use ninjarmm::error::RmmError;
use ninjarmm::ticketing::*;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_client(server: &MockServer) -> RmmClient {
    let tp = TokenProvider::with_token("mock-token");
    RmmClient::with_base_url(tp, &server.uri())
}

#[tokio::test]
async fn create_ticket_posts_payload_and_returns_ticket() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/ticketing/ticket"))
        .and(body_json(serde_json::json!({
            "clientId": 3,
            "ticketFormId": 1,
            "nodeId": 42,
            "subject": "Printer jammed",
            "description": {
                "public": true,
                "body": "Paper stuck in tray 2",
                "timeTracked": 0,
                "duplicateInIncidents": false
            },
            "status": "1000",
            "type": "PROBLEM",
            "cc": {"uids": [], "emails": []},
            "priority": "HIGH",
            "tags": ["hardware"],
            "attributes": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 501,
            "version": 1,
            "clientId": 3,
            "nodeId": 42,
            "subject": "Printer jammed",
            "status": {"name": "NEW", "displayName": "New", "statusId": 1000},
            "type": "PROBLEM",
            "priority": "HIGH",
            "severity": "NONE",
            "createTime": 1700666991.17
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let new_ticket = NewTicket {
        client_id: 3,
        ticket_form_id: 1,
        node_id: 42,
        subject: "Printer jammed".to_string(),
        description: NewTicketDescription {
            public: true,
            body: "Paper stuck in tray 2".to_string(),
            ..Default::default()
        },
        status: "1000".to_string(),
        ticket_type: Some(TicketType::Problem),
        priority: Some(Priority::High),
        tags: vec!["hardware".to_string()],
        ..Default::default()
    };
    let ticket = create_ticket(&client, &new_ticket).await.unwrap();
    assert_eq!(ticket.id, 501);
    assert_eq!(ticket.status.status_id, 1000);
    assert_eq!(ticket.severity, Some(Severity::None));
    assert!(!ticket.create_time.is_zero());
}

#[tokio::test]
async fn get_ticket_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/ticketing/ticket/501"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 501,
            "subject": "Printer jammed",
            "ccList": {"uids": ["u-1"], "emails": []}
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let ticket = get_ticket(&client, 501).await.unwrap();
    assert_eq!(ticket.cc_list.uids, vec!["u-1"]);
}

#[tokio::test]
async fn update_ticket_puts_to_ticket_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/ticketing/ticket/501"))
        .and(body_partial_json(serde_json::json!({
            "id": 501,
            "version": 2,
            "subject": "Printer fixed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 501,
            "version": 3,
            "subject": "Printer fixed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let ticket = Ticket {
        id: 501,
        version: 2,
        subject: "Printer fixed".to_string(),
        ..Default::default()
    };
    let updated = update_ticket(&client, &ticket).await.unwrap();
    assert_eq!(updated.version, 3);
}

#[tokio::test]
async fn ticket_id_is_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = get_ticket(&client, 0).await.unwrap_err();
    assert!(matches!(err, RmmError::InvalidInput(ref m) if m == "ticket ID required"));

    let err = update_ticket(&client, &Ticket::default()).await.unwrap_err();
    assert!(matches!(err, RmmError::InvalidInput(_)));
}

#[tokio::test]
async fn version_conflict_surfaces_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/ticketing/ticket/501"))
        .respond_with(ResponseTemplate::new(409).set_body_string("version mismatch"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let ticket = Ticket {
        id: 501,
        ..Default::default()
    };
    let err = update_ticket(&client, &ticket).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(409));
    assert!(err.to_string().contains("version mismatch"));
}
