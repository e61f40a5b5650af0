//! `/api` reverse proxy
//!
//! The browser talks to the console origin only. Every `/api/{*path}` call is
//! relayed to the Treasury Monitor backend configured by `BACKEND_URL`, and
//! the backend's status, content type and body are passed back unchanged.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use serde::Serialize;

use crate::core::config::Config;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Request headers relayed to the backend
const FORWARDED_HEADERS: [header::HeaderName; 3] =
    [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Backend unavailable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Failed to read backend response: {0}")]
    Body(#[source] reqwest::Error),
}

/// Error body, shaped like the backend's own errors so the client parses it
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response()
    }
}

#[derive(Clone)]
struct ProxyState {
    config: Arc<Config>,
    client: reqwest::Client,
}

/// Router serving `/api/{*path}` for every method
pub fn api_proxy_router(config: Config) -> Router {
    let client = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        });

    let state = ProxyState {
        config: Arc::new(config),
        client,
    };

    Router::new()
        .route("/api/{*path}", any(proxy_handler))
        .with_state(state)
}

async fn proxy_handler(
    State(state): State<ProxyState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let mut url = state.config.backend_endpoint(&path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&query);
    }

    tracing::debug!("Proxying {} {}", method, url);

    let mut upstream = state.client.request(method.clone(), &url);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            upstream = upstream.header(name, value.clone());
        }
    }
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    let resp = upstream.send().await.map_err(|e| {
        tracing::error!("Failed to reach backend for {} {}: {}", method, url, e);
        ProxyError::Unreachable(e)
    })?;

    let status = resp.status();
    let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = resp.bytes().await.map_err(|e| {
        tracing::error!("Failed to read backend response for {}: {}", url, e);
        ProxyError::Body(e)
    })?;

    if status.is_server_error() {
        tracing::warn!("Backend returned {} for {} {}", status, method, url);
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json,
        http::Request,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn config_for(backend_url: &str) -> Config {
        Config {
            backend_url: backend_url.to_string(),
            api_prefix: "/api".to_string(),
        }
    }

    /// Start a stand-in backend on an ephemeral port and return its base URL
    async fn spawn_backend() -> String {
        async fn echo(
            method: Method,
            RawQuery(query): RawQuery,
            headers: HeaderMap,
            body: String,
        ) -> Json<Value> {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Json(json!({
                "method": method.as_str(),
                "query": query,
                "authorization": auth,
                "body": body,
            }))
        }

        async fn unauthorized() -> Response {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Token expired"})),
            )
                .into_response()
        }

        let backend = Router::new()
            .route("/api/billing/history", get(echo))
            .route("/api/auth/login", post(echo))
            .route("/api/auth/profile", get(unauthorized));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_query_and_authorization() {
        let app = api_proxy_router(config_for(&spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/billing/history?limit=5")
                    .header("Authorization", "Bearer acc-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["method"], "GET");
        assert_eq!(body["query"], "limit=5");
        assert_eq!(body["authorization"], "Bearer acc-1");
    }

    #[tokio::test]
    async fn test_forwards_json_body() {
        let app = api_proxy_router(config_for(&spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"email":"a@b.co","password":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["method"], "POST");
        assert_eq!(body["body"], r#"{"email":"a@b.co","password":"x"}"#);
        assert!(body["authorization"].is_null());
    }

    #[tokio::test]
    async fn test_relays_error_status_and_body() {
        let app = api_proxy_router(config_for(&spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(json_body(response).await["detail"], "Token expired");
    }

    #[tokio::test]
    async fn test_unreachable_backend_returns_bad_gateway() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = api_proxy_router(config_for(&format!("http://{}", addr)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Backend unavailable")
        );
    }

    #[tokio::test]
    async fn test_non_api_paths_are_not_routed() {
        let app = api_proxy_router(config_for("http://127.0.0.1:1"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
