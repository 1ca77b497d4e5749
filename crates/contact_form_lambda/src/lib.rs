//! Lambda integration for the contact form endpoint.
//!
//! This crate owns runtime integration details (event normalization, the
//! request handler, environment configuration, and the email provider
//! adapter). Domain rules live in `contact_form_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
