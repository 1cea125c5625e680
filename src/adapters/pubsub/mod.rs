//! Pub/Sub publisher adapter

pub mod client;
pub mod models;

pub use client::PubSubPublisher;
pub use models::{PublishRequest, PublishResponse};
