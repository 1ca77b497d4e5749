//! Notification email rendering.
//!
//! All submitted values are interpolated through maud, which HTML-escapes
//! them; only the fixed stylesheet is emitted pre-escaped.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::contract::ValidatedSubmission;
use crate::labels::{display_interests, display_lms, display_role};

pub const BRAND_NAME: &str = "NovaLearn";
pub const BRAND_DOMAIN: &str = "novalearn.co.uk";
pub const REPLY_SUBJECT: &str = "Re: Your NovaLearn Inquiry";

/// Characters that would end or split a `mailto:` address or header value.
const MAILTO_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b',')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

const EMAIL_STYLES: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; }
.container { max-width: 600px; margin: 0 auto; padding: 20px; }
.header { background: linear-gradient(135deg, #9b3d2b 0%, #7a3022 100%); color: white; padding: 20px; border-radius: 8px 8px 0 0; }
.content { background: #f9f9f9; padding: 20px; border: 1px solid #e0e0e0; border-top: none; border-radius: 0 0 8px 8px; }
.field { margin-bottom: 16px; }
.label { font-weight: 600; color: #666; font-size: 12px; text-transform: uppercase; letter-spacing: 0.5px; }
.value { margin-top: 4px; font-size: 16px; }
.message-box { background: white; padding: 16px; border-radius: 8px; border: 1px solid #e0e0e0; margin-top: 8px; }
.footer { margin-top: 20px; padding-top: 20px; border-top: 1px solid #e0e0e0; font-size: 12px; color: #666; }
";

pub fn email_subject(submission: &ValidatedSubmission) -> String {
    format!(
        "New {BRAND_NAME} Inquiry from {} - {}",
        submission.name, submission.institution
    )
}

pub fn render_email_html(submission: &ValidatedSubmission) -> String {
    email_document(submission).into_string()
}

fn email_document(submission: &ValidatedSubmission) -> Markup {
    let mailto = mailto_href(&submission.email, None);
    let reply_href = mailto_href(&submission.email, Some(REPLY_SUBJECT));

    html! {
        (DOCTYPE)
        html {
            head {
                style { (PreEscaped(EMAIL_STYLES)) }
            }
            body {
                div.container {
                    div.header {
                        h1 style="margin: 0; font-size: 24px;" { "New Contact Form Submission" }
                        p style="margin: 8px 0 0 0; opacity: 0.9;" { "From " (BRAND_DOMAIN) }
                    }
                    div.content {
                        (field("Name", html! { (submission.name) }))
                        (field("Email", html! { a href=(mailto) { (submission.email) } }))
                        (field("Institution", html! { (submission.institution) }))
                        (field("Role", html! { (display_role(submission.role.as_deref())) }))
                        (field("LMS", html! { (display_lms(submission.lms.as_deref())) }))
                        (field("Interested In", html! { (display_interests(submission.interest.as_ref())) }))
                        @if let Some(message) = &submission.message {
                            div.field {
                                div.label { "Additional Message" }
                                div."message-box" { (message_lines(message)) }
                            }
                        }
                        div.footer {
                            p { strong { "Quick Actions:" } }
                            p {
                                a href=(reply_href) { "Reply to " (submission.name) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn mailto_href(address: &str, subject: Option<&str>) -> String {
    let address = utf8_percent_encode(address, MAILTO_COMPONENT);
    match subject {
        Some(subject) => format!(
            "mailto:{address}?subject={}",
            utf8_percent_encode(subject, MAILTO_COMPONENT)
        ),
        None => format!("mailto:{address}"),
    }
}

fn field(label: &str, value: Markup) -> Markup {
    html! {
        div.field {
            div.label { (label) }
            div.value { (value) }
        }
    }
}

fn message_lines(message: &str) -> Markup {
    html! {
        @for (index, line) in message.split('\n').enumerate() {
            @if index > 0 { br; }
            (line)
        }
    }
}
