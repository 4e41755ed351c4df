use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Column widths of `posts.title` and `posts.author`, counted in characters.
pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_AUTHOR_LEN: usize = 100;

/// A board post as stored and as sent over the wire.
///
/// Timestamps are local date-times without a zone suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row to insert; the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update. `None` fields are left untouched, `updated_at` is always written.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
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
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Current local time truncated to the microsecond resolution of a Postgres
/// `TIMESTAMP`, so the value handed to storage is the value read back.
pub fn current_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::ValidationError(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

impl NewPost {
    pub fn from_request(req: CreatePostRequest, now: NaiveDateTime) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        check_len("title", &self.title, MAX_TITLE_LEN)?;
        check_len("author", &self.author, MAX_AUTHOR_LEN)
    }
}

impl PostChanges {
    pub fn from_request(req: UpdatePostRequest, now: NaiveDateTime) -> Self {
        Self {
            title: req.title,
            content: req.content,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.title {
            Some(title) => check_len("title", title, MAX_TITLE_LEN),
            None => Ok(()),
        }
    }
}
