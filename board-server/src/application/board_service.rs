use crate::data::post_repository::PostRepository;
use crate::domain::post::{
    current_timestamp, CreatePostRequest, NewPost, PostChanges, UpdatePostRequest,
};
use crate::domain::{DomainError, Post};
use std::sync::Arc;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

pub struct BoardService {
    post_repo: Arc<dyn PostRepository>,
}

impl BoardService {
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    /// Returns one page of posts, newest first.
    ///
    /// `page` is 1-based. Both arguments are expected to be at least 1; the
    /// HTTP layer rejects anything smaller before calling in.
    pub async fn get_all_posts(&self, page: i64, page_size: i64) -> Result<Vec<Post>, DomainError> {
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        self.post_repo.list(page_size, offset).await
    }

    pub async fn get_total_count(&self) -> Result<i64, DomainError> {
        self.post_repo.count().await
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.post_repo.find_by_id(id).await
    }

    pub async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let new_post = NewPost::from_request(req, current_timestamp());
        new_post.validate()?;
        let post = self.post_repo.insert(new_post).await?;

        tracing::info!("Post created: id={}, author={}", post.id, post.author);

        Ok(post)
    }

    /// Applies the fields present in `req` and always refreshes `updated_at`.
    pub async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<Option<Post>, DomainError> {
        let changes = PostChanges::from_request(req, current_timestamp());
        changes.validate()?;
        let updated = self.post_repo.update_by_id(id, changes).await?;

        match &updated {
            Some(post) => tracing::info!("Post updated: id={}", post.id),
            None => tracing::debug!("Update skipped, post {} does not exist", id),
        }

        Ok(updated)
    }

    pub async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let removed = self.post_repo.delete_by_id(id).await? > 0;

        if removed {
            tracing::info!("Post deleted: id={}", id);
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InMemoryPostRepository;

    fn service() -> BoardService {
        BoardService::new(Arc::new(InMemoryPostRepository::new()))
    }

    fn request(n: usize) -> CreatePostRequest {
        CreatePostRequest {
            title: format!("Test Post {}", n),
            content: format!("Test Content {}", n),
            author: "Test Author".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() {
        let service = service();

        let post = service.create_post(request(1)).await.unwrap();

        assert!(post.id > 0);
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.title, "Test Post 1");
        assert_eq!(post.content, "Test Content 1");
        assert_eq!(post.author, "Test Author");

        let read_back = service.get_post_by_id(post.id).await.unwrap();
        assert_eq!(read_back, Some(post));
    }

    #[tokio::test]
    async fn total_count_tracks_creates_and_deletes() {
        let service = service();
        let mut ids = Vec::new();
        for n in 0..4 {
            ids.push(service.create_post(request(n)).await.unwrap().id);
        }
        assert_eq!(service.get_total_count().await.unwrap(), 4);

        assert!(service.delete_post(ids[0]).await.unwrap());
        assert_eq!(service.get_total_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn pages_are_newest_first_and_split_by_offset() {
        let service = service();
        for n in 0..15 {
            service.create_post(request(n)).await.unwrap();
        }

        let first = service.get_all_posts(1, 10).await.unwrap();
        let second = service.get_all_posts(2, 10).await.unwrap();
        let beyond = service.get_all_posts(3, 10).await.unwrap();

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 5);
        assert!(beyond.is_empty());
        assert!(first.iter().all(|p| first[0].created_at >= p.created_at));
        assert!(first
            .iter()
            .chain(second.iter())
            .collect::<Vec<_>>()
            .windows(2)
            .all(|w| (w[0].created_at, w[0].id) > (w[1].created_at, w[1].id)));
        assert_eq!(second.last().map(|p| p.title.as_str()), Some("Test Post 0"));
    }

    #[tokio::test]
    async fn title_only_update_keeps_other_fields() {
        let service = service();
        let original = service.create_post(request(1)).await.unwrap();

        let updated = service
            .update_post(
                original.id,
                UpdatePostRequest {
                    title: Some("Updated Title".into()),
                    content: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.content, original.content);
        assert_eq!(updated.author, original.author);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[tokio::test]
    async fn empty_update_still_touches_updated_at() {
        let service = service();
        let original = service.create_post(request(1)).await.unwrap();

        let updated = service
            .update_post(original.id, UpdatePostRequest::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, original.title);
        assert_eq!(updated.content, original.content);
        assert!(updated.updated_at >= original.updated_at);
        assert!(updated.created_at <= updated.updated_at);
    }

    #[tokio::test]
    async fn missing_post_is_absent_not_an_error() {
        let service = service();

        assert!(service.get_post_by_id(999999).await.unwrap().is_none());
        assert!(service
            .update_post(999999, UpdatePostRequest::default())
            .await
            .unwrap()
            .is_none());
        assert!(!service.delete_post(999999).await.unwrap());
    }

    #[tokio::test]
    async fn over_long_fields_are_rejected_without_writing() {
        let service = service();
        let original = service.create_post(request(1)).await.unwrap();

        let mut long_title = request(2);
        long_title.title = "t".repeat(256);
        assert!(matches!(
            service.create_post(long_title).await,
            Err(DomainError::ValidationError(_))
        ));

        let mut long_author = request(3);
        long_author.author = "a".repeat(101);
        assert!(service.create_post(long_author).await.is_err());
        assert_eq!(service.get_total_count().await.unwrap(), 1);

        let result = service
            .update_post(
                original.id,
                UpdatePostRequest {
                    title: Some("t".repeat(256)),
                    content: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
        assert_eq!(
            service.get_post_by_id(original.id).await.unwrap(),
            Some(original)
        );
    }

    #[tokio::test]
    async fn second_delete_reports_false() {
        let service = service();
        let post = service.create_post(request(1)).await.unwrap();

        assert!(service.delete_post(post.id).await.unwrap());
        assert!(service.get_post_by_id(post.id).await.unwrap().is_none());
        assert!(!service.delete_post(post.id).await.unwrap());
    }
}
