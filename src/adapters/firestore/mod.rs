//! Firestore managed export adapter
//!
//! Talks to the `exportDocuments` endpoint and to the long-running
//! operations resource it returns.

pub mod client;
pub mod models;

pub use client::FirestoreClient;
pub use models::Operation;
