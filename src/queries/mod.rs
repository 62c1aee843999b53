//! Query modules for the collection client.
//!
//! Each module provides a query struct that borrows the
//! [`ApiClient`](crate::transport::ApiClient) and exposes methods returning
//! `Result<T>` with typed payloads. Errors are propagated unchanged; the
//! [`loaders`](crate::loaders) decide which of them degrade to empty data.

pub mod cards;
pub mod collections;

pub use cards::CardQuery;
pub use collections::CollectionQuery;
