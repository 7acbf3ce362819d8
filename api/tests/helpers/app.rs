use api::routes::routes;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use db::test_utils::setup_test_db;
use serde_json::Value;
use util::config::AppConfig;
use util::state::AppState;

/// Builds the full application router backed by a fresh in-memory database
/// with all migrations applied. Returns the router and the state so tests
/// can seed data directly through the model helpers.
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_jwt_duration_minutes(60);

    let db = setup_test_db().await;
    let app_state = AppState::new(db);

    let router = Router::new().nest("/api", routes(app_state.clone()));
    (router, app_state)
}

pub async fn get_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
