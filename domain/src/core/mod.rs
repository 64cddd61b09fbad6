//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelDescriptor`]: a (provider, model) pair naming one backend
//! - [`question::Question`]: a validated question to cross-validate
//! - [`error::DomainError`]: configuration-level errors

pub mod error;
pub mod model;
pub mod question;
