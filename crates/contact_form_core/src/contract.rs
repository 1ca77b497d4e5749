use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

/// Raw form payload as posted by the browser. Every field is optional on the
/// wire so that missing values surface as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub institution: Option<String>,
    pub role: Option<String>,
    pub lms: Option<String>,
    pub interest: Option<InterestSelection>,
    pub message: Option<String>,
}

/// The form sends a single checkbox value as a string and several as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum InterestSelection {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub institution: String,
    pub role: Option<String>,
    pub lms: Option<String>,
    pub interest: Option<InterestSelection>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
    missing_fields: Vec<&'static str>,
}

impl ValidationError {
    pub fn missing_fields(missing_fields: Vec<&'static str>) -> Self {
        Self {
            message: MISSING_REQUIRED_FIELDS.to_string(),
            missing_fields,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.missing_fields
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message, self.missing_fields.join(", "))
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_submission(
    submission: ContactSubmission,
) -> Result<ValidatedSubmission, ValidationError> {
    let name = non_empty(submission.name);
    let email = non_empty(submission.email);
    let institution = non_empty(submission.institution);

    let (name, email, institution) = match (name, email, institution) {
        (Some(name), Some(email), Some(institution)) => (name, email, institution),
        (name, email, institution) => {
            let missing = [
                ("name", name.is_none()),
                ("email", email.is_none()),
                ("institution", institution.is_none()),
            ]
            .into_iter()
            .filter(|(_, is_missing)| *is_missing)
            .map(|(field, _)| field)
            .collect();
            return Err(ValidationError::missing_fields(missing));
        }
    };

    Ok(ValidatedSubmission {
        name,
        email,
        institution,
        role: non_empty(submission.role),
        lms: non_empty(submission.lms),
        interest: submission.interest,
        message: non_empty(submission.message),
    })
}

/// Stable digest of a submission, used to correlate log lines without
/// writing personal data to them.
pub fn submission_fingerprint(submission: &ValidatedSubmission) -> String {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(submission).unwrap_or_default());
    format!("{:x}", hasher.finalize())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
