//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{debug, error, info, warn};

use crate::planner::{CancelFlag, Planner, RouteRequest, SearchError};
use crate::report::render_report;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops/search", get(search_stops))
        .route("/route/plan", post(plan_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stops by partial name.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stops = state
        .names
        .search(&req.q, limit)
        .into_iter()
        .map(StopSearchResult::from)
        .collect();

    Json(StopSearchResponse { stops })
}

/// Check if request prefers the plain-text itinerary.
fn accepts_text(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/plain"))
}

/// Plan the cheapest route between two named stops.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let start = state.names.resolve(&req.start).ok_or_else(|| AppError::BadRequest {
        message: format!("Stop not found: {}", req.start),
    })?;
    let goal = state.names.resolve(&req.goal).ok_or_else(|| AppError::BadRequest {
        message: format!("Stop not found: {}", req.goal),
    })?;
    let request = RouteRequest::new(start, goal);

    // The search is CPU-bound; run it off the async workers and stop it
    // through the cancel flag if it outlives the budget.
    let cancel = CancelFlag::new();
    let task = {
        let graph = state.graph.clone();
        let config = state.config.clone();
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || {
            Planner::new(&graph, &config)
                .with_cancel(cancel)
                .find_route(&request)
        })
    };

    let result = match tokio::time::timeout(state.config.search_timeout(), task).await {
        Ok(joined) => joined
            .map_err(|e| AppError::Internal {
                message: format!("Search task failed: {e}"),
            })?
            .map_err(AppError::from)?,
        Err(_) => {
            cancel.cancel();
            return Err(AppError::Timeout {
                message: format!("Search exceeded {} ms", state.config.search_timeout_ms),
            });
        }
    };

    info!(
        start = state.graph.stop_name(start),
        goal = state.graph.stop_name(goal),
        transfers = result.report.transfers(),
        expanded = result.stats.states_expanded,
        "route planned"
    );

    if accepts_text(&headers) {
        let text = render_report(&state.graph, &result.report).map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;
        Ok(text.into_response())
    } else {
        Ok(Json(PlanRouteResponse::from_result(&state.graph, &result)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(message) => AppError::BadRequest { message },
            SearchError::NotFound => AppError::NotFound {
                message: e.to_string(),
            },
            SearchError::CapacityExceeded(_) => AppError::Unavailable {
                message: e.to_string(),
            },
            SearchError::Cancelled => AppError::Timeout {
                message: e.to_string(),
            },
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unavailable { message }
            | AppError::Timeout { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, TransitGraph};
    use crate::planner::{CapacityExceeded, SearchConfig};
    use axum::http::HeaderValue;

    fn graph() -> TransitGraph {
        let mut b = GraphBuilder::new();
        let c = b.add_stop("Chembur Naka", 19.0622, 72.9005).unwrap();
        let d = b.add_stop("Deonar Depot", 19.0490, 72.9120).unwrap();
        let m = b.add_stop("Mankhurd Station", 19.0480, 72.9320).unwrap();
        b.add_stop("Vashi Plaza", 19.0770, 72.9980).unwrap();
        b.add_route("362", vec![(1, c), (2, d)]).unwrap();
        b.add_route("504", vec![(1, d), (2, m)]).unwrap();
        b.build()
    }

    fn state() -> AppState {
        AppState::new(graph(), SearchConfig::default())
    }

    fn body(start: &str, goal: &str) -> Bytes {
        Bytes::from(format!(r#"{{"start": "{start}", "goal": "{goal}"}}"#))
    }

    fn text_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/plain"));
        headers
    }

    async fn plan(state: AppState, headers: HeaderMap, body: Bytes) -> Result<Response, AppError> {
        plan_route(State(state), headers, body).await
    }

    #[test]
    fn accepts_text_checks_header() {
        assert!(accepts_text(&text_headers()));
        assert!(!accepts_text(&HeaderMap::new()));

        let mut json = HeaderMap::new();
        json.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_text(&json));
    }

    #[test]
    fn search_errors_map_to_status() {
        let status = |e: SearchError| AppError::from(e).status();
        assert_eq!(status(SearchError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(SearchError::InvalidRequest("same stop".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(SearchError::CapacityExceeded(CapacityExceeded { limit: 5 })),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status(SearchError::Cancelled), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn plan_route_returns_json() {
        let response = plan(state(), HeaderMap::new(), body("chembur", "mankhurd"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let ct = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(ct.to_str().unwrap().starts_with("application/json"));
    }

    #[tokio::test]
    async fn plan_route_returns_text_when_asked() {
        let response = plan(state(), text_headers(), body("chembur", "mankhurd"))
            .await
            .unwrap();
        let ct = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(ct.to_str().unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn plan_route_rejects_bad_input() {
        let err = plan(state(), HeaderMap::new(), Bytes::from_static(b"{"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = plan(state(), HeaderMap::new(), body("Colaba", "Deonar"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = plan(state(), HeaderMap::new(), body("deonar", "Deonar Depot"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn plan_route_unreachable_is_not_found() {
        let err = plan(state(), HeaderMap::new(), body("chembur", "vashi"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn capacity_exceeded_is_unavailable() {
        let state = AppState::new(graph(), SearchConfig::new(30.0, Some(1), 5000));
        let err = plan(state, HeaderMap::new(), body("chembur", "mankhurd"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn search_past_budget_is_gateway_timeout() {
        // The island is unreachable, so the search would otherwise walk the
        // whole grid; a zero budget expires first.
        let graph = crate::graph::grid_with_island(200);
        let state = AppState::new(graph, SearchConfig::new(30.0, None, 0));
        let err = plan(state, HeaderMap::new(), body("R0C0", "Island"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn stop_search_limits_results() {
        let Json(response) = search_stops(
            State(state()),
            Query(StopSearchRequest {
                q: "a".into(),
                limit: Some(2),
            }),
        )
        .await;
        assert_eq!(response.stops.len(), 2);
    }
}
