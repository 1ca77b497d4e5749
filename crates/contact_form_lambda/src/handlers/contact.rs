use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use contact_form_core::contract::{
    submission_fingerprint, validate_submission, ContactSubmission, ValidatedSubmission,
    ValidationError,
};
use contact_form_core::email::{compose_contact_email, SentEmail};
use serde_json::{json, Value};

use crate::adapters::email_sender::EmailSender;
use crate::config::ContactHandlerConfig;
use crate::handlers::gateway::{
    empty_response, json_response, request_body, request_method, ApiGatewayResponse,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    MethodNotAllowed { method: Option<String> },
    MissingRequiredFields(ValidationError),
    SendFailed(String),
    Unexpected(String),
}

impl ContactError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed { .. } => 405,
            Self::MissingRequiredFields(_) => 400,
            Self::SendFailed(_) | Self::Unexpected(_) => 500,
        }
    }

    /// Message returned to the caller. Detail carried by the variant stays in
    /// the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed { .. } => "Method not allowed",
            Self::MissingRequiredFields(_) => "Missing required fields",
            Self::SendFailed(_) => "Failed to send email",
            Self::Unexpected(_) => "Server error",
        }
    }
}

impl std::fmt::Display for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MethodNotAllowed { method } => write!(
                f,
                "method not allowed: {}",
                method.as_deref().unwrap_or("<none>")
            ),
            Self::MissingRequiredFields(error) => write!(f, "{error}"),
            Self::SendFailed(detail) => write!(f, "email send failed: {detail}"),
            Self::Unexpected(detail) => write!(f, "unexpected failure: {detail}"),
        }
    }
}

impl std::error::Error for ContactError {}

enum ContactReply {
    Preflight,
    Sent(SentEmail),
}

/// Handles one contact form request. Every outcome, including a panic inside
/// the sender, becomes an HTTP response carrying the CORS headers.
pub fn handle_contact_event(
    event: Value,
    config: &ContactHandlerConfig,
    sender: &dyn EmailSender,
) -> ApiGatewayResponse {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| process_event(&event, config, sender)));

    let result = match outcome {
        Ok(result) => result,
        Err(payload) => Err(ContactError::Unexpected(panic_message(&*payload))),
    };

    match result {
        Ok(ContactReply::Preflight) => empty_response(200),
        Ok(ContactReply::Sent(sent)) => json_response(200, json!({"success": true, "id": sent.id})),
        Err(error) => {
            if let ContactError::Unexpected(detail) = &error {
                log_contact_error("unexpected_failure", json!({ "error": detail }));
            }
            json_response(
                error.status_code(),
                json!({ "error": error.public_message() }),
            )
        }
    }
}

fn process_event(
    event: &Value,
    config: &ContactHandlerConfig,
    sender: &dyn EmailSender,
) -> Result<ContactReply, ContactError> {
    let method = request_method(event);
    match method.as_deref() {
        Some("OPTIONS") => return Ok(ContactReply::Preflight),
        Some("POST") => {}
        _ => {
            log_contact_info(
                "submission_rejected",
                json!({
                    "reason": "method_not_allowed",
                    "method": method.clone(),
                }),
            );
            return Err(ContactError::MethodNotAllowed { method });
        }
    }

    let body = request_body(event).map_err(ContactError::Unexpected)?;
    let submission: ContactSubmission = serde_json::from_value(body)
        .map_err(|error| ContactError::Unexpected(format!("invalid submission: {error}")))?;

    let submission = validate_submission(submission).map_err(|error| {
        log_contact_info(
            "submission_rejected",
            json!({
                "reason": "missing_required_fields",
                "missing_fields": error.fields(),
            }),
        );
        ContactError::MissingRequiredFields(error)
    })?;

    let fingerprint = submission_fingerprint(&submission);
    log_contact_info(
        "submission_received",
        submission_received_details(method.as_deref(), &fingerprint, &submission),
    );

    let email = compose_contact_email(&submission, &config.sender, &config.recipient);
    let started_at = Instant::now();
    match sender.send_email(&email) {
        Ok(sent) => {
            log_contact_info(
                "email_sent",
                json!({
                    "fingerprint": fingerprint,
                    "id": sent.id.clone(),
                    "duration_ms": started_at.elapsed().as_millis(),
                }),
            );
            Ok(ContactReply::Sent(sent))
        }
        Err(error) => {
            log_contact_error(
                "email_send_failed",
                json!({
                    "fingerprint": fingerprint,
                    "duration_ms": started_at.elapsed().as_millis(),
                    "error": error.clone(),
                }),
            );
            Err(ContactError::SendFailed(error))
        }
    }
}

fn submission_received_details(
    method: Option<&str>,
    fingerprint: &str,
    submission: &ValidatedSubmission,
) -> Value {
    json!({
        "method": method,
        "fingerprint": fingerprint,
        "has_role": submission.role.is_some(),
        "has_lms": submission.lms.is_some(),
        "has_interest": submission.interest.is_some(),
        "has_message": submission.message.is_some(),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panic: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panic: {message}")
    } else {
        "panic with non-string payload".to_string()
    }
}

fn log_contact_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "contact_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_contact_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "contact_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use contact_form_core::email::OutgoingEmail;

    use super::*;

    struct CapturingSender {
        emails: Mutex<Vec<OutgoingEmail>>,
        result: Result<SentEmail, String>,
    }

    impl CapturingSender {
        fn succeeding(id: &str) -> Self {
            Self {
                emails: Mutex::new(Vec::new()),
                result: Ok(SentEmail { id: id.to_string() }),
            }
        }

        fn failing(error: &str) -> Self {
            Self {
                emails: Mutex::new(Vec::new()),
                result: Err(error.to_string()),
            }
        }

        fn emails(&self) -> Vec<OutgoingEmail> {
            self.emails.lock().expect("poisoned mutex").clone()
        }
    }

    impl EmailSender for CapturingSender {
        fn send_email(&self, email: &OutgoingEmail) -> Result<SentEmail, String> {
            self.emails
                .lock()
                .expect("poisoned mutex")
                .push(email.clone());
            self.result.clone()
        }
    }

    fn post_event(body: Value) -> Value {
        json!({ "httpMethod": "POST", "body": body.to_string() })
    }

    fn body_json(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).expect("response body should be json")
    }

    #[test]
    fn maps_errors_to_status_and_public_message() {
        let cases = [
            (ContactError::MethodNotAllowed { method: None }, 405, "Method not allowed"),
            (
                ContactError::MissingRequiredFields(ValidationError::missing_fields(vec!["name"])),
                400,
                "Missing required fields",
            ),
            (ContactError::SendFailed("x".to_string()), 500, "Failed to send email"),
            (ContactError::Unexpected("x".to_string()), 500, "Server error"),
        ];

        for (error, status, message) in cases {
            assert_eq!(error.status_code(), status);
            assert_eq!(error.public_message(), message);
        }
    }

    #[test]
    fn uses_configured_sender_and_recipient() {
        let sender = CapturingSender::succeeding("id-1");
        let config = ContactHandlerConfig {
            sender: "Forms <forms@example.org>".to_string(),
            recipient: "sales@example.org".to_string(),
        };

        let response = handle_contact_event(
            post_event(json!({"name": "Ada", "email": "ada@example.org", "institution": "UCL"})),
            &config,
            &sender,
        );

        assert_eq!(response.status_code, 200);
        let emails = sender.emails();
        assert_eq!(emails[0].from, "Forms <forms@example.org>");
        assert_eq!(emails[0].to, vec!["sales@example.org".to_string()]);
    }

    #[test]
    fn does_not_send_when_validation_fails() {
        let sender = CapturingSender::succeeding("unused");
        let response = handle_contact_event(
            post_event(json!({"name": "Ada"})),
            &ContactHandlerConfig::default(),
            &sender,
        );

        assert_eq!(response.status_code, 400);
        assert!(sender.emails().is_empty());
    }

    #[test]
    fn hides_provider_detail_on_send_failure() {
        let sender = CapturingSender::failing("resend returned 403: api key revoked");
        let response = handle_contact_event(
            post_event(json!({"name": "Ada", "email": "ada@example.org", "institution": "UCL"})),
            &ContactHandlerConfig::default(),
            &sender,
        );

        assert_eq!(response.status_code, 500);
        assert_eq!(body_json(&response), json!({"error": "Failed to send email"}));
        assert!(!response.body.contains("403"));
    }

    #[test]
    fn wrong_field_type_is_a_server_error() {
        let sender = CapturingSender::succeeding("unused");
        let response = handle_contact_event(
            post_event(json!({"name": 42, "email": "ada@example.org", "institution": "UCL"})),
            &ContactHandlerConfig::default(),
            &sender,
        );

        assert_eq!(response.status_code, 500);
        assert_eq!(body_json(&response), json!({"error": "Server error"}));
        assert!(sender.emails().is_empty());
    }

    #[test]
    fn received_log_carries_method_without_personal_data() {
        let submission = validate_submission(ContactSubmission {
            name: Some("Ada".to_string()),
            email: Some("ada@example.org".to_string()),
            institution: Some("UCL".to_string()),
            message: Some("hello".to_string()),
            ..ContactSubmission::default()
        })
        .expect("submission should validate");

        let details = submission_received_details(Some("POST"), "abc", &submission);

        assert_eq!(details["method"], "POST");
        assert_eq!(details["fingerprint"], "abc");
        assert_eq!(details["has_message"], true);
        assert_eq!(details["has_role"], false);
        assert!(!details.to_string().contains("ada@example.org"));
    }

    #[test]
    fn panic_message_reads_string_payloads() {
        assert_eq!(panic_message(&"boom"), "panic: boom");
        assert_eq!(panic_message(&"boom".to_string()), "panic: boom");
        assert_eq!(panic_message(&7_u8), "panic with non-string payload");
    }
}
