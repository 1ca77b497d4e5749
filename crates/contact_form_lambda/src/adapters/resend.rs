//! Email sender backed by the Resend REST API
//! (https://resend.com/docs/api-reference/emails/send-email).

use contact_form_core::email::{OutgoingEmail, SentEmail};
use serde::{Deserialize, Serialize};

use crate::adapters::email_sender::EmailSender;
use crate::config::ResendSettings;

#[derive(Debug, Serialize)]
struct ResendSendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl<'a> From<&'a OutgoingEmail> for ResendSendRequest<'a> {
    fn from(email: &'a OutgoingEmail) -> Self {
        Self {
            from: &email.from,
            to: &email.to,
            reply_to: &email.reply_to,
            subject: &email.subject,
            html: &email.html,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResendSendResponse {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ResendErrorResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct ResendEmailSender {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ResendEmailSender {
    pub fn new(settings: &ResendSettings) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|error| format!("failed to build resend http client: {error}"))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            endpoint: format!("{}/emails", settings.base_url),
        })
    }
}

impl EmailSender for ResendEmailSender {
    fn send_email(&self, email: &OutgoingEmail) -> Result<SentEmail, String> {
        let request = ResendSendRequest::from(email);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let response = self
                    .client
                    .post(&self.endpoint)
                    .bearer_auth(&self.api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|error| format!("resend request failed: {error}"))?;

                let status = response.status().as_u16();
                let text = response
                    .text()
                    .await
                    .map_err(|error| format!("failed to read resend response: {error}"))?;

                parse_send_response(status, &text)
            })
        })
    }
}

fn parse_send_response(status: u16, body: &str) -> Result<SentEmail, String> {
    if !(200..300).contains(&status) {
        let detail: ResendErrorResponse = serde_json::from_str(body).unwrap_or_default();
        return Err(match (detail.name, detail.message) {
            (Some(name), Some(message)) => format!("resend returned {status}: {name}: {message}"),
            (None, Some(message)) => format!("resend returned {status}: {message}"),
            _ => format!("resend returned {status}: {body}"),
        });
    }

    serde_json::from_str::<ResendSendResponse>(body)
        .map(|response| SentEmail { id: response.id })
        .map_err(|error| format!("invalid resend response: {error}"))
}
