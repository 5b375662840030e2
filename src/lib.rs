//! Example Service - Reference CRUD service with partner enrichment
//!
//! This crate demonstrates layered request handling for a single `Example`
//! entity: validated CRUD through a business service, use-case orchestration
//! over an external partner API (parallel enrichment, pre-create validation,
//! fire-and-forget notification), and swappable persistence backends.
//!
//! Dependencies point inward: `adapters` implement the traits in `ports`,
//! `application` coordinates `domain` logic through those ports, and nothing
//! in `domain` knows about HTTP, SQL, or the process environment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
