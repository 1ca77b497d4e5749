//! Code → label tables for the coded form options.
//!
//! Fallback rule shared by every table: a recognized code renders as its
//! label, an unrecognized value renders verbatim, and an absent or empty value
//! renders as [`NOT_SPECIFIED`].

use crate::contract::InterestSelection;

pub const NOT_SPECIFIED: &str = "Not specified";

pub type LabelTable = &'static [(&'static str, &'static str)];

pub const INTEREST_LABELS: LabelTable = &[
    ("demo", "Book a demo"),
    ("bett", "Meeting at Bett London (Jan 21-23)"),
    ("pricing", "Pricing information"),
    ("info", "General information"),
];

pub const ROLE_LABELS: LabelTable = &[
    ("teacher", "Teacher / Lecturer"),
    ("head", "Head of Department"),
    ("it", "IT / Technology Lead"),
    ("admin", "Administrator / Leadership"),
    ("procurement", "Procurement"),
    ("other", "Other"),
];

pub const LMS_LABELS: LabelTable = &[
    ("canvas", "Canvas"),
    ("moodle", "Moodle"),
    ("blackboard", "Blackboard"),
    ("schoology", "Schoology"),
    ("google", "Google Classroom"),
    ("other", "Other"),
    ("none", "None / Not sure"),
];

pub fn lookup_label(table: LabelTable, code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| *label)
}

/// Label for a present value: mapped when recognized, raw otherwise.
pub fn label_or_raw(table: LabelTable, value: &str) -> String {
    lookup_label(table, value)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

pub fn display_label(table: LabelTable, value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => label_or_raw(table, value),
        _ => NOT_SPECIFIED.to_string(),
    }
}

pub fn display_role(role: Option<&str>) -> String {
    display_label(ROLE_LABELS, role)
}

pub fn display_lms(lms: Option<&str>) -> String {
    display_label(LMS_LABELS, lms)
}

pub fn display_interests(interest: Option<&InterestSelection>) -> String {
    match interest {
        Some(InterestSelection::Many(codes)) if !codes.is_empty() => codes
            .iter()
            .map(|code| label_or_raw(INTEREST_LABELS, code))
            .collect::<Vec<_>>()
            .join(", "),
        Some(InterestSelection::One(code)) => display_label(INTEREST_LABELS, Some(code)),
        _ => NOT_SPECIFIED.to_string(),
    }
}
