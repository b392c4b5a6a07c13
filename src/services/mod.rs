pub use errors::{ServiceError, ServiceResult};

pub mod contracts;
pub mod errors;
pub mod events;
pub mod favorites;
pub mod main;
pub mod messages;
pub mod vendor_services;
pub mod vendors;

#[cfg(test)]
pub(crate) mod fixtures;
