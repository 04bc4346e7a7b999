//! # Portal Core
//!
//! Domain entities, services, and repository traits for the client portal.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
