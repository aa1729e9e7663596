// rest_api/src/lib.rs

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use dashboard_lib::models::{Disease, FieldError, ValidationError};
use dashboard_lib::{Dashboard, DashboardError, Report, ServerConfig, SessionHandle, SessionStore};

pub mod cookies;
pub mod pages;

use crate::cookies::{expired_session_cookie, with_session};
use crate::pages::{render_not_found, render_page, PageOutcome};

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("{0}")]
    InvalidFields(ValidationError),
    #[error("unknown disease '{0}'")]
    UnknownDisease(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Dashboard(DashboardError),
}

impl From<JsonRejection> for RestApiError {
    fn from(rejection: JsonRejection) -> Self {
        RestApiError::InvalidInput(rejection.body_text())
    }
}

impl From<ValidationError> for RestApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownDisease(slug) => RestApiError::UnknownDisease(slug),
            other => RestApiError::InvalidFields(other),
        }
    }
}

impl From<DashboardError> for RestApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Validation(v) => RestApiError::from(v),
            other => RestApiError::Dashboard(other),
        }
    }
}

#[derive(Serialize)]
struct FieldErrorBody<'a> {
    status: &'static str,
    message: String,
    fields: &'a [FieldError],
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            RestApiError::InvalidFields(err) => {
                let body = FieldErrorBody {
                    status: "error",
                    message: err.to_string(),
                    fields: err.field_errors(),
                };
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            RestApiError::UnknownDisease(slug) => (StatusCode::NOT_FOUND, format!("unknown disease '{}'", slug)),
            RestApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, format!("Invalid input: {}", msg)),
            RestApiError::Dashboard(e) => {
                error!("Dashboard error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, sessions: SessionStore) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            sessions: Arc::new(sessions),
        }
    }

    async fn session(&self, headers: &HeaderMap) -> SessionHandle {
        self.sessions.open(cookies::session_id(headers)).await
    }
}

/// Form values as text; numbers and strings are accepted from JSON bodies.
/// A body that is not an object carries no fields, so every field is
/// reported missing.
fn json_fields(body: Value) -> HashMap<String, String> {
    let Value::Object(body) = body else {
        warn!("Prediction body is not a JSON object");
        return HashMap::new();
    };
    body.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}

async fn submit(
    state: &AppState,
    handle: &SessionHandle,
    disease: Disease,
    fields: &HashMap<String, String>,
) -> Result<Report, DashboardError> {
    let mut session = handle.session.lock().await;
    state.dashboard.submit(&mut session, disease, fields)
}

// Handler for GET /
async fn index_handler() -> Redirect {
    Redirect::to(&format!("/{}", Disease::ALL[0].slug()))
}

// Handler for GET /{disease}
async fn page_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Ok(disease) = slug.parse::<Disease>() else {
        return (StatusCode::NOT_FOUND, Html(render_not_found(&slug))).into_response();
    };
    let handle = state.session(&headers).await;
    let html = render_page(disease, &HashMap::new(), PageOutcome::Blank);
    with_session(&handle, Html(html))
}

// Handler for POST /{disease}
async fn page_submit_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let Ok(disease) = slug.parse::<Disease>() else {
        return (StatusCode::NOT_FOUND, Html(render_not_found(&slug))).into_response();
    };
    let handle = state.session(&headers).await;
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            warn!("Rejected {} form body: {}", disease, rejection.body_text());
            let message = format!("Invalid input: {}", rejection.body_text());
            let html = render_page(disease, &HashMap::new(), PageOutcome::Failed(&message));
            return with_session(&handle, (StatusCode::BAD_REQUEST, Html(html)));
        }
    };

    let response = match submit(&state, &handle, disease, &fields).await {
        Ok(report) => (
            StatusCode::OK,
            Html(render_page(disease, &fields, PageOutcome::Report(&report))),
        ),
        Err(DashboardError::Validation(err)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_page(disease, &fields, PageOutcome::Invalid(err.field_errors()))),
        ),
        Err(err) => {
            error!("{} submission failed: {}", disease, err);
            let message = err.to_string();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(disease, &fields, PageOutcome::Failed(&message))),
            )
        }
    };
    with_session(&handle, response)
}

// Handler for the /api/v1/health endpoint
async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "Dashboard is healthy" })))
}

// Handler for the /api/v1/version endpoint
async fn version_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "version": env!("CARGO_PKG_VERSION"), "api_level": 1 })))
}

// Handler for /api/v1/diseases
async fn diseases_handler() -> Json<Value> {
    let diseases: Vec<Value> = Disease::ALL
        .iter()
        .map(|disease| {
            json!({
                "slug": disease.slug(),
                "name": disease.name(),
                "title": disease.page_title(),
                "fields": disease.fields(),
                "feature_count": disease.feature_count(),
                "summary_metrics": disease.summary_metrics(),
                "comparison_metrics": disease.comparison_metrics(),
            })
        })
        .collect();
    Json(json!({ "status": "success", "diseases": diseases }))
}

// Handler for /api/v1/predict/{disease}
async fn predict_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, RestApiError> {
    let disease: Disease = slug.parse()?;
    let Json(body) = payload?;
    let handle = state.session(&headers).await;
    let fields = json_fields(body);
    let result = submit(&state, &handle, disease, &fields).await;
    // A rejected form may still have started the session.
    match result {
        Ok(report) => Ok(with_session(&handle, Json(json!({ "status": "success", "report": report })))),
        Err(err) => Ok(with_session(&handle, RestApiError::from(err))),
    }
}

// Handler for /api/v1/history/{disease}
async fn history_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, RestApiError> {
    let disease: Disease = slug.parse()?;
    let handle = state.session(&headers).await;
    let report = {
        let session = handle.session.lock().await;
        state.dashboard.report(&session, disease)
    };
    Ok(with_session(&handle, Json(json!({ "status": "success", "report": report }))))
}

// Handler for DELETE /api/v1/session
async fn end_session_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ended = match cookies::session_id(&headers) {
        Some(id) => state.sessions.end(id).await,
        None => false,
    };
    let mut response = Json(json!({ "status": "success", "ended": ended })).into_response();
    if let Ok(value) = HeaderValue::from_str(&expired_session_cookie()) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/:disease", get(page_handler).post(page_submit_handler))
        .route("/api/v1/health", get(health_check_handler))
        .route("/api/v1/version", get(version_handler))
        .route("/api/v1/diseases", get(diseases_handler))
        .route("/api/v1/predict/:disease", post(predict_handler))
        .route("/api/v1/history/:disease", get(history_handler))
        .route("/api/v1/session", delete(end_session_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub fn bind_address(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", server.host, server.port))
}

/// Serves the dashboard on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = build_router(state);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dashboard server failed to start or run")?;
    Ok(())
}

// Main function to start the dashboard server
pub async fn start_server(
    server: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = bind_address(server)?;
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {}", addr))?;
    info!("Dashboard listening on http://{}", addr);
    serve(listener, state, shutdown).await?;
    info!("Dashboard server stopped.");
    Ok(())
}
