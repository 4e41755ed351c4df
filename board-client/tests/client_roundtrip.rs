use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use board_client::{BoardClient, BoardClientError};
use board_server::{presentation::routes, BoardService, InMemoryPostRepository};

/// Starts the real route table over an in-memory store on an ephemeral port.
fn spawn_server() -> String {
    let service = web::Data::new(BoardService::new(Arc::new(InMemoryPostRepository::new())));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind test server");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    format!("http://{}", addr)
}

#[actix_rt::test]
async fn health_check() {
    let client = BoardClient::new(spawn_server()).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
}

#[actix_rt::test]
async fn crud_through_client() {
    let client = BoardClient::new(spawn_server()).unwrap();

    let created = client
        .create_post("Test Post", "Test Content", "Test Author")
        .await
        .unwrap();
    let id = created.id.expect("server assigns an id");
    assert_eq!(created.created_at, created.updated_at);

    let fetched = client.get_post(id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = client
        .update_post(id, Some("Updated Title".into()), None)
        .await
        .unwrap();
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.content, "Test Content");
    assert!(updated.updated_at >= created.updated_at);

    client.delete_post(id).await.unwrap();

    let err = client.get_post(id).await.unwrap_err();
    assert!(err.is_not_found());
    let err = client.delete_post(id).await.unwrap_err();
    assert!(matches!(err, BoardClientError::NotFound));
}

#[actix_rt::test]
async fn pages_through_fifteen_posts() {
    let client = BoardClient::new(spawn_server()).unwrap();
    for i in 0..15 {
        client
            .create_post(format!("Post {}", i), "body", "author")
            .await
            .unwrap();
    }

    let first = client.list_posts(1, 10).await.unwrap();
    assert_eq!(first.posts.len(), 10);
    assert_eq!(first.total, 15);
    assert_eq!(first.total_pages(), 2);
    assert!(first.has_next_page());

    let second = client.list_posts(2, 10).await.unwrap();
    assert_eq!(second.posts.len(), 5);
    assert!(!second.has_next_page());
}

#[actix_rt::test]
async fn bad_page_size_is_invalid_request() {
    let client = BoardClient::new(spawn_server()).unwrap();

    let err = client.list_posts(1, 0).await.unwrap_err();
    assert!(err.is_invalid_request());
}
