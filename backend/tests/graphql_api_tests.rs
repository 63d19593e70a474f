//! End-to-end tests through the HTTP router
//!
//! These drive the full stack (axum router, GraphQL schema, loaders and the
//! SQLite store) the way a client would.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use bookshelf::app::{AppState, build_app};
use bookshelf::db::Database;
use bookshelf::graphql::build_schema;
use bookshelf::services::AuthService;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::in_memory().await.unwrap();
    let schema = build_schema(db.clone(), AuthService::new(db.clone(), 4));
    build_app(AppState { db, schema })
}

async fn post(app: &Router, query: &str) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_author_book_lifecycle() {
    let app = app().await;

    let created = post(&app, r#"mutation { addAuthor(name: "Ada", age: 30) { id name age } }"#).await;
    let author_id = created["data"]["addAuthor"]["id"].as_str().unwrap().to_string();
    assert_eq!(
        created,
        json!({ "data": { "addAuthor": { "id": author_id, "name": "Ada", "age": 30 } } })
    );

    let created = post(
        &app,
        &format!(
            r#"mutation {{ addBook(name: "Book1", genre: "Fiction", authorId: "{author_id}") {{ id name genre authorId }} }}"#
        ),
    )
    .await;
    let book_id = created["data"]["addBook"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["addBook"]["genre"], "Fiction");
    assert_eq!(created["data"]["addBook"]["authorId"], author_id.as_str());

    let listed = post(&app, &format!(r#"{{ author(id: "{author_id}") {{ book {{ name }} }} }}"#)).await;
    assert_eq!(
        listed,
        json!({ "data": { "author": { "book": [{ "name": "Book1" }] } } })
    );

    let deleted = post(&app, &format!(r#"mutation {{ deleteAuthor(id: "{author_id}") {{ id }} }}"#)).await;
    assert_eq!(deleted, json!({ "data": { "deleteAuthor": { "id": author_id } } }));

    let gone = post(&app, &format!(r#"{{ book(id: "{book_id}") {{ id }} }}"#)).await;
    assert_eq!(gone, json!({ "data": { "book": null } }));
}

#[tokio::test]
async fn test_login_does_not_leak_password() {
    let app = app().await;

    post(
        &app,
        r#"mutation { addUser(fullname: "Grace Hopper", username: "grace", password: "cobol") { id } }"#,
    )
    .await;

    let login = post(&app, r#"mutation { login(username: "grace", password: "cobol") { fullname username } }"#).await;
    assert_eq!(
        login,
        json!({ "data": { "login": { "fullname": "Grace Hopper", "username": "grace" } } })
    );

    let denied = post(&app, r#"mutation { login(username: "grace", password: "COBOL") { id } }"#).await;
    assert_eq!(denied, json!({ "data": { "login": null } }));
}

#[tokio::test]
async fn test_validation_errors_are_structured() {
    let app = app().await;

    let response = post(&app, r#"mutation { addBook(name: "No genre", authorId: "x") { id } }"#).await;
    let errors = response["errors"].as_array().unwrap();
    assert!(!errors.is_empty());
    assert!(errors[0]["message"].as_str().unwrap().contains("genre"));

    let books = post(&app, "{ books { id } }").await;
    assert_eq!(books, json!({ "data": { "books": [] } }));
}
