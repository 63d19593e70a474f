//! Application state and HTTP router construction.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::db::Database;
use crate::graphql::BookshelfSchema;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub schema: BookshelfSchema,
}

/// Build the full Axum router: /graphql, health probes, CORS and tracing.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(api::health::router())
        .merge(api::graphql::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::graphql::build_schema;
    use crate::services::AuthService;

    async fn test_app() -> Router {
        let db = Database::in_memory().await.unwrap();
        let config = Config::from_lookup(|key| (key == "BCRYPT_COST").then(|| "4".to_string()))
            .unwrap();
        let schema = build_schema(db.clone(), AuthService::new(db.clone(), config.bcrypt_cost));
        build_app(AppState { db, schema })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn graphql_post(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readyz_reports_database() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(body_json(response).await, json!({ "ready": true, "database": true }));
    }

    #[tokio::test]
    async fn test_readyz_fails_once_store_is_closed() {
        let db = Database::in_memory().await.unwrap();
        let schema = build_schema(db.clone(), AuthService::new(db.clone(), 4));
        let app = build_app(AppState {
            db: db.clone(),
            schema,
        });
        db.close().await;

        let response = app
            .oneshot(Request::get("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ready": false, "database": false }));
    }

    #[tokio::test]
    async fn test_graphql_post_round_trip() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(graphql_post(
                r#"mutation { addAuthor(name: "Ada", age: 30) { id } }"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let id = created["data"]["addAuthor"]["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(graphql_post(&format!(
                r#"{{ author(id: "{id}") {{ name age book {{ name }} }} }}"#
            )))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "author": { "name": "Ada", "age": 30, "book": [] } } })
        );
    }

    #[tokio::test]
    async fn test_graphql_get_without_html_is_rejected() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_graphiql_for_browsers() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::get("/graphql")
                    .header(header::ACCEPT, "text/html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
