//! HTTP handlers.

pub mod email_webhook;
pub mod health;
pub mod submit_ticket;
pub mod ticket_get;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::IntakeOutcome;
use helpdesk_core::ErrorSet;

/// Body returned on a successful submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitSuccess {
    pub message: String,
    pub ticket_id: i64,
    pub attachments_count: usize,
}

#[derive(Debug, Serialize)]
struct IntakeErrorBody {
    errors: ErrorSet,
}

impl IntoResponse for IntakeOutcome {
    fn into_response(self) -> Response {
        match self {
            IntakeOutcome::Accepted {
                ticket_id,
                attachments_count,
            } => (
                StatusCode::CREATED,
                Json(SubmitSuccess {
                    message: "Ticket submitted successfully".to_string(),
                    ticket_id,
                    attachments_count,
                }),
            )
                .into_response(),
            IntakeOutcome::Rejected(errors) => {
                (StatusCode::BAD_REQUEST, Json(IntakeErrorBody { errors })).into_response()
            }
            IntakeOutcome::Failed(errors) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(IntakeErrorBody { errors }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::IntakeField;
    use serde_json::json;

    #[test]
    fn test_success_body_shape() {
        let body = SubmitSuccess {
            message: "Ticket submitted successfully".to_string(),
            ticket_id: 42,
            attachments_count: 2,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "message": "Ticket submitted successfully",
                "ticket_id": 42,
                "attachments_count": 2,
            })
        );
    }

    #[test]
    fn test_error_body_shape() {
        let mut errors = ErrorSet::new();
        errors.insert(IntakeField::KNumber, "K-Number is required");
        let body = IntakeErrorBody { errors };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "errors": {
                    "k_number": "K-Number is required",
                }
            })
        );
    }
}
