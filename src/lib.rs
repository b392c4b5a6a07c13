//! Core library exports for the Vendor Hub marketplace.
//!
//! The `data` feature exposes the persistence and domain layer on its own.
//! The `server` feature adds forms, services, routes and the integrations
//! used by the web application.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod llm;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod storage;

/// Role granted by the auth service to people planning events.
pub const CLIENT_ROLE: &str = "client";
/// Role granted by the auth service to people selling services.
pub const VENDOR_ROLE: &str = "vendor";
