use std::time::Duration;

use contact_form_core::email::{DEFAULT_RECIPIENT, DEFAULT_SENDER};

pub const RESEND_API_KEY_VAR: &str = "RESEND_API_KEY";
pub const RESEND_API_BASE_URL_VAR: &str = "RESEND_API_BASE_URL";
pub const RESEND_TIMEOUT_SECS_VAR: &str = "RESEND_TIMEOUT_SECS";
pub const CONTACT_FROM_ADDRESS_VAR: &str = "CONTACT_FROM_ADDRESS";
pub const CONTACT_TO_ADDRESS_VAR: &str = "CONTACT_TO_ADDRESS";

pub const DEFAULT_RESEND_API_BASE_URL: &str = "https://api.resend.com";
pub const DEFAULT_RESEND_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactHandlerConfig {
    pub sender: String,
    pub recipient: String,
}

impl Default for ContactHandlerConfig {
    fn default() -> Self {
        Self {
            sender: DEFAULT_SENDER.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

impl ContactHandlerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            sender: non_blank(lookup(CONTACT_FROM_ADDRESS_VAR)).unwrap_or(defaults.sender),
            recipient: non_blank(lookup(CONTACT_TO_ADDRESS_VAR)).unwrap_or(defaults.recipient),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ResendSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendSettings {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let api_key = non_blank(lookup(RESEND_API_KEY_VAR))
            .ok_or_else(|| format!("{RESEND_API_KEY_VAR} must be configured"))?;

        let base_url = non_blank(lookup(RESEND_API_BASE_URL_VAR))
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_RESEND_API_BASE_URL.to_string());

        let timeout_secs = match non_blank(lookup(RESEND_TIMEOUT_SECS_VAR)) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(format!(
                        "{RESEND_TIMEOUT_SECS_VAR} must be a positive integer, got '{raw}'"
                    ))
                }
                Ok(value) => value,
            },
            None => DEFAULT_RESEND_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// The API key never appears in debug output.
impl std::fmt::Debug for ResendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
