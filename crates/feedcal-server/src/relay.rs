//! The relay HTTP contract.
//!
//! Browsers cannot fetch most calendar feeds directly because of CORS, so
//! the relay fetches the feed server-side and hands the body back with
//! permissive CORS headers. [`RelayClient`](feedcal_feed::RelayClient) is the
//! consumer of this router.

use std::time::Duration;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderName, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use feedcal_feed::normalize_feed_url;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

use crate::error::{ServerError, ServerResult};

/// Path the relay is mounted on.
pub const RELAY_PATH: &str = "/api/proxy";

const ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];

/// JSON body of relay error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProxyQuery {
    url: Option<String>,
}

#[derive(Clone)]
struct RelayState {
    client: reqwest::Client,
}

/// Builds the HTTP client the relay uses for upstream fetches.
pub fn upstream_client(timeout: Duration) -> ServerResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("feedcal-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ServerError::config(format!("failed to build HTTP client: {e}")))
}

/// Builds the relay router using `client` for upstream requests.
pub fn relay_router(client: reqwest::Client) -> Router {
    Router::new()
        .route(RELAY_PATH, get(proxy).options(preflight))
        .fallback(fallback)
        .with_state(RelayState { client })
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn fallback(method: Method) -> StatusCode {
    if method == Method::OPTIONS {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn proxy(
    State(state): State<RelayState>,
    query: Result<Query<ProxyQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected relay query");
            return error_response(StatusCode::BAD_REQUEST, "URL parameter is required", None);
        }
    };
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "URL parameter is required", None);
    };

    let target = normalize_feed_url(&url);
    debug!(url = %target, "Relaying calendar");

    match fetch_upstream(&state.client, &target).await {
        Ok(body) => ([(header::CONTENT_TYPE, "text/calendar")], body).into_response(),
        Err(e) => {
            error!(url = %target, error = %e, "Proxy error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch calendar",
                Some(e.to_string()),
            )
        }
    }
}

async fn fetch_upstream(client: &reqwest::Client, url: &str) -> ServerResult<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ServerError::upstream(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServerError::upstream(
            status.canonical_reason().unwrap_or(status.as_str()),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| ServerError::upstream(e.to_string()))
}

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    let body = RelayErrorBody {
        error: error.to_string(),
        details,
    };
    (status, Json(body)).into_response()
}
