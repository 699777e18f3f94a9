//! HTTP client functionality for reaching the admin REST API.
//!
//! This module provides:
//!
//! - [`RestClient`]: An authenticated JSON client for a single shop
//! - [`RemoteApiError`]: The error type for all remote call failures
//!
//! The concrete resource and webhook handles in
//! [`resources`](crate::resources) are built on top of this client.

mod errors;
mod rest_client;

pub use errors::RemoteApiError;
pub use rest_client::{RestClient, BRIDGE_VERSION, RETRY_WAIT_TIME};
