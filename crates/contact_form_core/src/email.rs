use serde::{Deserialize, Serialize};

use crate::contract::ValidatedSubmission;
use crate::render::{email_subject, render_email_html};

pub const DEFAULT_SENDER: &str = "NovaLearn <contact@novalearn.co.uk>";
pub const DEFAULT_RECIPIENT: &str = "lars@novalearn.co.uk";

/// Provider-agnostic message handed to an email sender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentEmail {
    pub id: String,
}

pub fn compose_contact_email(
    submission: &ValidatedSubmission,
    sender: &str,
    recipient: &str,
) -> OutgoingEmail {
    OutgoingEmail {
        from: sender.to_string(),
        to: vec![recipient.to_string()],
        reply_to: submission.email.clone(),
        subject: email_subject(submission),
        html: render_email_html(submission),
    }
}
