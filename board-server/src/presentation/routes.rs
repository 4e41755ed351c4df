use crate::domain::DomainError;
use crate::presentation::http_handlers::{self, error_body, error_to_response};
use actix_web::{error::InternalError, web};

/// Registers every route of the API together with the extractor settings
/// that turn malformed input into 400 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(path_config())
        .app_data(query_config())
        .app_data(json_config())
        .route("/", web::get().to(http_handlers::index))
        .route("/health", web::get().to(http_handlers::health))
        .service(
            web::scope("/posts")
                .route("", web::get().to(http_handlers::list_posts))
                .route("", web::post().to(http_handlers::create_post))
                .route("/{id}", web::get().to(http_handlers::get_post))
                .route("/{id}", web::put().to(http_handlers::update_post))
                .route("/{id}", web::delete().to(http_handlers::delete_post)),
        );
}

// Non-numeric ids never reach the service.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        tracing::debug!("Rejected path {}: {}", req.path(), err);
        InternalError::from_response(err, error_to_response(DomainError::InvalidId)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        tracing::debug!("Rejected query for {}: {}", req.path(), err);
        let response = error_to_response(DomainError::ValidationError(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::debug!("Rejected body for {}: {}", req.path(), err);
        let response = actix_web::HttpResponse::BadRequest().json(error_body(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}
