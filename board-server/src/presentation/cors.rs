use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy from a comma separated origin list. `*` allows any origin.
pub fn configure_cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    for origin in allowed_origins.split(',').map(str::trim) {
        match origin {
            "" => {}
            "*" => cors = cors.allow_any_origin(),
            origin => {
                cors = cors.allowed_origin(origin);
                tracing::debug!("Added allowed CORS origin: {}", origin);
            }
        }
    }

    cors
}
