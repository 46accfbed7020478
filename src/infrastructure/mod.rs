//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for caching and the upstream weather API.
//!
//! # Modules
//!
//! - [`cache`] - Cache stores (Redis, in-memory) and the recording decorator
//! - [`provider`] - HTTP client for the upstream weather API

pub mod cache;
pub mod provider;
