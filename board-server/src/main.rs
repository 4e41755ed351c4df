use dotenvy::dotenv;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use board_server::{
    infrastructure::{
        config::ServerConfig,
        database::{create_pool, run_migrations},
        logging::{init_logging, DEFAULT_LOG_FILTER},
    },
    presentation::{cors::configure_cors, routes},
    BoardService, PostgresPostRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    init_logging(DEFAULT_LOG_FILTER)?;

    let config = ServerConfig::from_env();
    let http_addr = config.http_addr();

    tracing::info!("Starting board server...");
    tracing::info!("HTTP server will listen on {}", http_addr);
    tracing::info!("CORS allowed origins: {}", config.cors_allowed_origins);

    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;

    let post_repo = Arc::new(PostgresPostRepository::new(pool.clone()));
    let board_service = web::Data::new(BoardService::new(post_repo));

    let cors_allowed_origins = config.cors_allowed_origins.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&cors_allowed_origins))
            .app_data(board_service.clone())
            .configure(routes::configure)
    })
    .bind(&http_addr)?
    .run();

    tracing::info!("HTTP server running on {}", http_addr);

    server.await?;

    tracing::info!("Shutting down, closing database pool...");
    pool.close().await;

    Ok(())
}
