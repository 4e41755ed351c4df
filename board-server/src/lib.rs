//! Board API server: posts stored in Postgres, served as JSON over HTTP.
//!
//! Layers, leaves first: `domain` (entity and errors), `data` (repositories),
//! `application` (the CRUD service), `presentation` (routes and handlers),
//! `infrastructure` (configuration, logging, pool and migrations).

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::BoardService;
pub use data::{InMemoryPostRepository, PostRepository, PostgresPostRepository};
pub use domain::{DomainError, Post};
