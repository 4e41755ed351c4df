pub mod memory_post_repository;
pub mod post_repository;

pub use memory_post_repository::InMemoryPostRepository;
pub use post_repository::{PostRepository, PostgresPostRepository};
