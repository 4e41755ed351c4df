use crate::application::board_service::{BoardService, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::domain::post::{CreatePostRequest, PostListResponse, UpdatePostRequest};
use crate::domain::DomainError;
use actix_web::{web, HttpResponse, Responder};

// Значения приходят строками: нечисловые page/pageSize заменяются значениями по умолчанию
#[derive(Debug, serde::Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl PaginationQuery {
    fn resolve(&self) -> Result<(i64, i64), DomainError> {
        let page = parse_or_default(self.page.as_deref(), DEFAULT_PAGE);
        let page_size = parse_or_default(self.page_size.as_deref(), DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(DomainError::ValidationError(
                "page must be at least 1".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(DomainError::ValidationError(
                "pageSize must be at least 1".to_string(),
            ));
        }

        Ok((page, page_size))
    }
}

fn parse_or_default(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn error_body(message: impl Into<String>) -> serde_json::Value {
    serde_json::json!({ "error": message.into() })
}

// Преобразование DomainError в HttpResponse
pub(crate) fn error_to_response(err: DomainError) -> HttpResponse {
    match err.to_status_code() {
        400 => HttpResponse::BadRequest().json(error_body(err.to_string())),
        404 => HttpResponse::NotFound().json(error_body(err.to_string())),
        503 => {
            tracing::error!("Request failed, storage unavailable: {}", err);
            HttpResponse::ServiceUnavailable().json(error_body(err.to_string()))
        }
        _ => {
            tracing::error!("Request failed: {}", err);
            HttpResponse::InternalServerError().json(error_body("Internal server error"))
        }
    }
}

// ============== Service Handlers ==============

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Board API is running")
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

// ============== Post Handlers ==============

pub async fn list_posts(
    board_service: web::Data<BoardService>,
    query: web::Query<PaginationQuery>,
) -> HttpResponse {
    let (page, page_size) = match query.resolve() {
        Ok(params) => params,
        Err(err) => return error_to_response(err),
    };

    tracing::debug!("Listing posts with page={}, page_size={}", page, page_size);

    let posts = match board_service.get_all_posts(page, page_size).await {
        Ok(posts) => posts,
        Err(err) => return error_to_response(err),
    };

    match board_service.get_total_count().await {
        Ok(total) => HttpResponse::Ok().json(PostListResponse {
            posts,
            total,
            page,
            page_size,
        }),
        Err(err) => error_to_response(err),
    }
}

pub async fn get_post(
    board_service: web::Data<BoardService>,
    path: web::Path<i64>,
) -> HttpResponse {
    let post_id = path.into_inner();

    tracing::debug!("Getting post with id={}", post_id);

    match board_service.get_post_by_id(post_id).await {
        Ok(Some(post)) => HttpResponse::Ok().json(post),
        Ok(None) => error_to_response(DomainError::PostNotFound),
        Err(err) => error_to_response(err),
    }
}

pub async fn create_post(
    board_service: web::Data<BoardService>,
    post_data: web::Json<CreatePostRequest>,
) -> HttpResponse {
    match board_service.create_post(post_data.into_inner()).await {
        Ok(post) => HttpResponse::Created().json(post),
        Err(err) => error_to_response(err),
    }
}

pub async fn update_post(
    board_service: web::Data<BoardService>,
    path: web::Path<i64>,
    post_data: web::Json<UpdatePostRequest>,
) -> HttpResponse {
    let post_id = path.into_inner();

    tracing::debug!("Updating post id={}", post_id);

    match board_service
        .update_post(post_id, post_data.into_inner())
        .await
    {
        Ok(Some(post)) => HttpResponse::Ok().json(post),
        Ok(None) => error_to_response(DomainError::PostNotFound),
        Err(err) => error_to_response(err),
    }
}

pub async fn delete_post(
    board_service: web::Data<BoardService>,
    path: web::Path<i64>,
) -> HttpResponse {
    let post_id = path.into_inner();

    tracing::debug!("Deleting post id={}", post_id);

    match board_service.delete_post(post_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => error_to_response(DomainError::PostNotFound),
        Err(err) => error_to_response(err),
    }
}
