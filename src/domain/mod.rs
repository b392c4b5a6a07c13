pub mod category;
pub mod contract;
pub mod event;
pub mod favorites;
pub mod geo;
pub mod message;
pub mod search;
pub mod service;
pub mod types;
pub mod vendor;
