//! In-memory stand-in for the scheduling service.
//!
//! Serves the same REST surface as the real backend (courses, instructors,
//! teaching units, calendars, allocation, health) over a process-local
//! store. Errors use the backend's `{"detail": "..."}` body so clients see
//! the same shapes they would in production.

mod allocation;
mod catalog;
pub mod store;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

use store::{Kind, Row, Store};

pub type Db = Arc<RwLock<Store>>;

/// Handler error rendered as `{"detail": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, detail = %self.detail, "request rejected");
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PeriodQuery {
    pub ano: Option<i64>,
    pub mes: Option<i64>,
}

/// Require a JSON object body.
fn object(body: Value) -> Result<Row, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::unprocessable("Corpo da requisição deve ser um objeto JSON")),
    }
}

pub fn app() -> Router {
    app_with_store(Store::default())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(catalog::routes(Kind::Curso, "/api/cursos"))
        .route("/api/cursos/{id}/ucs", get(catalog::course_units))
        .merge(catalog::routes(Kind::Docente, "/api/docentes"))
        .route("/api/docentes/{id}/disponibilidade", get(catalog::instructor_availability))
        .route("/api/docentes/{id}/ucs", get(catalog::instructor_units))
        .merge(catalog::routes(Kind::Uc, "/api/ucs"))
        .route("/api/ucs/por-curso/{id}", get(catalog::units_by_course))
        .route("/api/ucs/por-docente/{id}", get(catalog::units_by_instructor))
        .route("/api/ucs/{id}/vincular-docente/{docente_id}", put(catalog::link_instructor))
        .route("/api/ucs/{id}/desvincular-docente", put(catalog::unlink_instructor))
        .merge(catalog::routes(Kind::Calendario, "/api/calendario"))
        .route("/api/calendario/gerar", post(catalog::generate_calendar))
        .route("/api/calendario/por-curso/{id}", get(catalog::calendars_by_course))
        .route(
            "/api/calendario/calendario-mes/{id}/{ano}/{mes}",
            get(catalog::calendar_month),
        )
        .route("/api/calendario/eventos/{id}", get(catalog::course_events))
        .route(
            "/api/calendario/gerar-alocacao-automatica",
            post(allocation::generate_from_calendar),
        )
        .route("/api/alocacao/processar", post(allocation::process))
        .route("/api/alocacao/matriz-horarios", get(allocation::schedule_matrix))
        .route("/api/alocacao/disponibilidade/{id}", get(allocation::availability))
        .route("/api/alocacao/alocacoes-existentes", get(allocation::existing))
        .route("/api/alocacao/alocacao-manual", post(allocation::create_manual))
        .route(
            "/api/alocacao/alocacao/{id}",
            put(allocation::update).delete(allocation::delete),
        )
        .route("/api/alocacao/relatorio-docente/{id}", get(allocation::instructor_report))
        .route("/api/alocacao/estatisticas", get(allocation::statistics))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Scheduling API is running" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
