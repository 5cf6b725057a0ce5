//! Tickets.
//!
//! Attachments are not supported; tickets are created and updated with a
//! JSON body only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::activities::{Priority, Severity};
use crate::client::RmmClient;
use crate::error::RmmError;
use crate::query::is_zero;
use crate::wire_time::WireTime;

// ── Response types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Optimistic-locking version; send back unchanged on update.
    pub version: i64,
    pub node_id: i64,
    /// Organization the ticket belongs to.
    pub client_id: i64,
    pub location_id: i64,
    pub assigned_app_user_id: i64,
    pub requester_uid: String,
    pub subject: String,
    pub status: TicketStatus,
    #[serde(rename = "type")]
    pub ticket_type: Option<TicketType>,
    pub ticket_form_id: i64,
    pub source: String,
    pub tags: Vec<String>,
    pub cc_list: TicketCcList,
    pub create_time: WireTime,
    pub deleted: bool,
    pub attribute_values: Vec<TicketAttribute>,
    pub priority: Option<Priority>,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketStatus {
    pub name: String,
    pub display_name: String,
    pub parent_id: i64,
    pub status_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketCcList {
    pub uids: Vec<String>,
    pub emails: Vec<String>,
}

/// Value of a custom ticket-form attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketAttribute {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub attribute_id: i64,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    Problem,
    Question,
    Incident,
    Task,
    #[serde(other)]
    Unknown,
}

// ── Request types ──────────────────────────────────────────────────────

/// Payload for [`create_ticket`]. `client_id`, `ticket_form_id`,
/// `subject`, `description` and `status` are required by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTicket {
    pub client_id: i64,
    pub ticket_form_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub location_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub node_id: i64,
    /// At most 200 characters.
    pub subject: String,
    pub description: NewTicketDescription,
    /// Status ID as a string, e.g. `"1000"` for new.
    pub status: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    pub cc: TicketCcList,
    #[serde(skip_serializing_if = "is_zero")]
    pub assigned_app_user_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub requester_uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "is_zero")]
    pub parent_ticket_id: i64,
    pub tags: Vec<String>,
    pub attributes: Vec<TicketAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTicketDescription {
    pub public: bool,
    pub body: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub html_body: String,
    /// Seconds.
    pub time_tracked: i64,
    pub duplicate_in_incidents: bool,
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Creates a ticket and returns it as stored by the server.
///
/// # Errors
///
/// - `RmmError::Api`: 400 when a required field is missing or the form
///   does not exist.
/// - `RmmError::DispatchAuth`: token acquisition failed.
pub async fn create_ticket(
    client: &RmmClient,
    ticket: &NewTicket,
) -> crate::error::Result<Ticket> {
    client.post("ticketing/ticket", ticket).await
}

pub async fn get_ticket(client: &RmmClient, ticket_id: i64) -> crate::error::Result<Ticket> {
    if ticket_id == 0 {
        return Err(RmmError::InvalidInput("ticket ID required".to_string()));
    }
    client.get(&format!("ticketing/ticket/{ticket_id}")).await
}

/// Replaces a ticket. `ticket.id` selects the target; `version` must
/// match the stored one or the server answers 409.
pub async fn update_ticket(client: &RmmClient, ticket: &Ticket) -> crate::error::Result<Ticket> {
    if ticket.id == 0 {
        return Err(RmmError::InvalidInput("ticket ID required".to_string()));
    }
    client
        .put(&format!("ticketing/ticket/{}", ticket.id), ticket)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_deserializes() {
        let json = r#"{
            "id": 501,
            "version": 3,
            "nodeId": 42,
            "clientId": 3,
            "subject": "Printer jammed",
            "status": {"name": "OPEN", "displayName": "Open", "parentId": 0, "statusId": 2000},
            "type": "PROBLEM",
            "ticketFormId": 1,
            "source": "TECHNICIAN",
            "ccList": {"uids": [], "emails": ["it@contoso.com"]},
            "createTime": 1700666991.17,
            "deleted": false,
            "attributeValues": [{"id": 1, "attributeId": 9, "value": "floor 2"}],
            "priority": "HIGH",
            "severity": "MINOR"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, 501);
        assert_eq!(ticket.status.status_id, 2000);
        assert_eq!(ticket.ticket_type, Some(TicketType::Problem));
        assert_eq!(ticket.cc_list.emails, vec!["it@contoso.com"]);
        assert_eq!(ticket.attribute_values[0].value, "floor 2");
        assert_eq!(ticket.priority, Some(Priority::High));
        assert_eq!(ticket.severity, Some(Severity::Minor));
    }

    #[test]
    fn new_ticket_omits_unset_optionals() {
        let ticket = NewTicket {
            client_id: 3,
            ticket_form_id: 1,
            subject: "Printer jammed".to_string(),
            description: NewTicketDescription {
                public: true,
                body: "Paper stuck in tray 2".to_string(),
                ..Default::default()
            },
            status: "1000".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["clientId"], 3);
        assert_eq!(value["description"]["public"], true);
        assert!(value.get("nodeId").is_none());
        assert!(value.get("severity").is_none());
        assert!(value.get("type").is_none());
        assert!(value["description"].get("htmlBody").is_none());
    }
}
