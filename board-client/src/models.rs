use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl PostListResponse {
    /// `ceil(total / page_size)`, zero for an empty board.
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 || self.total <= 0 {
            return 0;
        }
        (self.total + self.page_size - 1) / self.page_size
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: i64, page: i64, page_size: i64) -> PostListResponse {
        PostListResponse {
            posts: vec![],
            total,
            page,
            page_size,
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page(15, 1, 10).total_pages(), 2);
        assert_eq!(page(20, 1, 10).total_pages(), 2);
        assert_eq!(page(1, 1, 10).total_pages(), 1);
        assert_eq!(page(0, 1, 10).total_pages(), 0);
    }

    #[test]
    fn navigation_flags() {
        assert!(page(15, 1, 10).has_next_page());
        assert!(!page(15, 2, 10).has_next_page());
        assert!(page(15, 2, 10).has_previous_page());
        assert!(!page(15, 1, 10).has_previous_page());
    }

    #[test]
    fn parses_server_wire_format() {
        let raw = r#"{
            "posts": [{
                "id": 3,
                "title": "Hello",
                "content": "World",
                "author": "kim",
                "createdAt": "2024-05-01T10:20:30.123456",
                "updatedAt": "2024-05-01T10:20:30"
            }],
            "total": 1,
            "page": 1,
            "pageSize": 10
        }"#;

        let parsed: PostListResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.posts[0].id, Some(3));
        assert_eq!(parsed.posts[0].author, "kim");
        assert!(parsed.posts[0].created_at > parsed.posts[0].updated_at);
        assert_eq!(parsed.page_size, 10);
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let body = serde_json::to_value(UpdatePostRequest {
            title: Some("t".into()),
            content: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "title": "t" }));
    }
}
