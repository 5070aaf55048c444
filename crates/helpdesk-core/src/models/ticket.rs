use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Workflow status of a persisted ticket.
///
/// New tickets are always created as `Pending`; the remaining states belong to
/// the staff triage workflow and are never set by the intake pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "ticket_status"))]
pub enum TicketStatus {
    Pending,
    #[serde(rename = "In Progress")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "In Progress"))]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }
}

/// Persisted ticket entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ticket {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub k_number: String,
    pub k_email: String,
    pub department: String,
    pub type_of_issue: String,
    pub additional_details: String,
    pub status: TicketStatus,
    pub priority: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub k_number: String,
    pub k_email: String,
    pub department: String,
    pub type_of_issue: String,
    pub additional_details: String,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketResponse {
    fn from(t: Ticket) -> Self {
        TicketResponse {
            id: t.id,
            name: t.name,
            surname: t.surname,
            k_number: t.k_number,
            k_email: t.k_email,
            department: t.department,
            type_of_issue: t.type_of_issue,
            additional_details: t.additional_details,
            status: t.status,
            priority: t.priority,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_with_display_names() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::to_string(&TicketStatus::Pending).unwrap(),
            "\"Pending\""
        );
    }
}
