//! Test app wiring servutil into an axum router

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use servutil::handler::HandlerResult;
use servutil::{Cause, ErrorOptions, server_error};

/// Router with one route per way of reporting a failure
pub fn app() -> Router {
    Router::new()
        .route("/users/{id}", get(get_user))
        .route("/io", get(io_failure))
        .route("/legacy", get(legacy_failure))
        .route("/echo", post(echo))
}

async fn get_user(Path(id): Path<u32>) -> HandlerResult<Json<Value>> {
    match id {
        0 => Err(server_error!(400, "id must be positive")),
        1 => Ok(Json(serde_json::json!({ "user_id": 1, "display_name": "Ada" }))),
        _ => Err(server_error!(
            format!("no user {id}"),
            ErrorOptions::new().status(http::StatusCode::NOT_FOUND)
        )),
    }
}

async fn io_failure() -> HandlerResult<()> {
    let error = std::io::Error::other("disk unavailable");
    Err(server_error!(503, Cause::new(error)))
}

async fn legacy_failure() -> HandlerResult<()> {
    Err(server_error!(serde_json::json!({ "status": "409" })))
}

/// Accepts camelCase, answers snake_case
async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(servutil::case::camel_to_snake_case(body))
}

/// Send a request through the router without a network listener
pub async fn send(request: http::Request<Body>) -> (http::StatusCode, Value) {
    use tower::ServiceExt;

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get_request(path: &str) -> http::Request<Body> {
    http::Request::get(path).body(Body::empty()).unwrap()
}
