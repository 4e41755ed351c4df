//! Async client for the board HTTP API.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::BoardClientError;
pub use http_client::{BoardClient, DEFAULT_BASE_URL};
pub use models::{Post, PostListResponse};
