//! Domain layer containing weather entities and request rules.
//!
//! # Architecture
//!
//! - [`entities`] - Queries, weather payloads and the tagged cache envelope
//! - [`cache_key`] - Deterministic cache key derivation
//! - [`validation`] - Rule registry and ordered validation pipeline
//! - [`provider`] - Upstream provider trait and failure kinds
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Provider and cache contracts are traits implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod cache_key;
pub mod entities;
pub mod provider;
pub mod validation;
