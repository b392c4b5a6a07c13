#[cfg(feature = "server")]
pub mod config;
pub mod event;
pub mod message;
pub mod service;
pub mod vendor;
