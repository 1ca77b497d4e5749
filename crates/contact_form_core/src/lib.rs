//! Contact form domain primitives.
//!
//! This crate owns the submission contract, validation, label tables, and the
//! rendering of the outgoing notification email. It intentionally excludes the
//! Lambda runtime and any HTTP client; see `contact_form_lambda` for those.

pub mod contract;
pub mod email;
pub mod labels;
pub mod render;
