//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: model identifier an agent talks to
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
