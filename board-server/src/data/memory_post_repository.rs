//! In-memory post storage.
//!
//! Holds the same contract as the Postgres repository: generated ids are
//! never reused, each call takes the lock exactly once and so applies
//! atomically. Data is lost when the value is dropped, which makes it the
//! isolated store used by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::data::post_repository::PostRepository;
use crate::domain::post::{NewPost, PostChanges};
use crate::domain::{DomainError, Post};

struct Store {
    next_id: i64,
    posts: BTreeMap<i64, Post>,
}

pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                posts: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store.posts.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let skip = usize::try_from(offset).unwrap_or(0);
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(posts.into_iter().skip(skip).take(take).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.store.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, DomainError> {
        post.validate()?;
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let stored = Post {
            id,
            title: post.title,
            content: post.content,
            author: post.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
        };
        store.posts.insert(id, stored.clone());

        Ok(stored)
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: PostChanges,
    ) -> Result<Option<Post>, DomainError> {
        changes.validate()?;
        let mut store = self.store.write().await;

        let Some(post) = store.posts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        post.updated_at = post.updated_at.max(changes.updated_at);

        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, DomainError> {
        let removed = self.store.write().await.posts.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let store = self.store.read().await;
        i64::try_from(store.posts.len())
            .map_err(|e| DomainError::InternalError(e.to_string()))
    }
}
