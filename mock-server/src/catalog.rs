//! Courses, instructors, teaching units and calendars.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::store::{Kind, Row, Store};
use crate::{object, ApiError, ApiResult, Db, PageQuery};

/// List/create at `{base}/`, get/update/delete at `{base}/{id}`.
pub(crate) fn routes(kind: Kind, base: &str) -> Router<Db> {
    Router::new()
        .route(
            &format!("{base}/"),
            get(move |db: State<Db>, page: Query<PageQuery>| list(kind, db, page))
                .post(move |db: State<Db>, body: Json<Value>| create(kind, db, body)),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(move |db: State<Db>, id: Path<i64>| fetch(kind, db, id))
                .put(move |db: State<Db>, id: Path<i64>, body: Json<Value>| {
                    update(kind, db, id, body)
                })
                .delete(move |db: State<Db>, id: Path<i64>| remove(kind, db, id)),
        )
}

async fn list(kind: Kind, State(db): State<Db>, Query(page): Query<PageQuery>) -> Json<Value> {
    let store = db.read().await;
    let rows = store
        .table(kind)
        .page(page.skip.unwrap_or(0), page.limit.unwrap_or(100));
    Json(json!(rows))
}

async fn create(kind: Kind, State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let row = object(body)?;
    for field in kind.required() {
        if row.get(*field).map_or(true, Value::is_null) {
            return Err(ApiError::unprocessable(format!(
                "Campo obrigatório ausente: {field}"
            )));
        }
    }

    let mut store = db.write().await;
    check_references(&store, &row)?;
    let created = store.table_mut(kind).insert(row);
    tracing::info!(?kind, id = %created["id"], "created");
    Ok(Json(Value::Object(created)))
}

async fn fetch(kind: Kind, State(db): State<Db>, Path(id): Path<i64>) -> ApiResult {
    let store = db.read().await;
    store
        .table(kind)
        .get(id)
        .map(|row| Json(Value::Object(row.clone())))
        .ok_or_else(|| ApiError::not_found(kind.not_found()))
}

async fn update(
    kind: Kind,
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    let changes = object(body)?;
    let mut store = db.write().await;
    if !store.table(kind).contains(id) {
        return Err(ApiError::not_found(kind.not_found()));
    }
    check_references(&store, &changes)?;
    let updated = store
        .table_mut(kind)
        .merge(id, changes)
        .ok_or_else(|| ApiError::not_found(kind.not_found()))?;
    Ok(Json(Value::Object(updated)))
}

async fn remove(kind: Kind, State(db): State<Db>, Path(id): Path<i64>) -> ApiResult {
    let mut store = db.write().await;
    store
        .table_mut(kind)
        .remove(id)
        .ok_or_else(|| ApiError::not_found(kind.not_found()))?;
    tracing::info!(?kind, id, "deleted");
    Ok(Json(json!({ "message": kind.deleted() })))
}

/// `curso_id` / `docente_id`, when set, must point at stored rows.
fn check_references(store: &Store, row: &Row) -> Result<(), ApiError> {
    if let Some(id) = row.get("curso_id").and_then(Value::as_i64) {
        if !store.cursos.contains(id) {
            return Err(ApiError::not_found(Kind::Curso.not_found()));
        }
    }
    if let Some(id) = row.get("docente_id").and_then(Value::as_i64) {
        if !store.docentes.contains(id) {
            return Err(ApiError::not_found(Kind::Docente.not_found()));
        }
    }
    Ok(())
}

pub(crate) async fn course_units(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult {
    let store = db.read().await;
    if !store.cursos.contains(id) {
        return Err(ApiError::not_found(Kind::Curso.not_found()));
    }
    Ok(Json(json!(store.ucs.filter_eq("curso_id", id))))
}

pub(crate) async fn instructor_units(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult {
    let store = db.read().await;
    if !store.docentes.contains(id) {
        return Err(ApiError::not_found(Kind::Docente.not_found()));
    }
    Ok(Json(json!(store.ucs.filter_eq("docente_id", id))))
}

pub(crate) async fn instructor_availability(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> ApiResult {
    let store = db.read().await;
    let docente = store
        .docentes
        .get(id)
        .ok_or_else(|| ApiError::not_found(Kind::Docente.not_found()))?;
    Ok(Json(json!({
        "disponibilidade": docente.get("disponibilidade").cloned().unwrap_or_else(|| json!({})),
        "horarios": docente.get("horarios").cloned().unwrap_or_else(|| json!({})),
    })))
}

pub(crate) async fn units_by_course(State(db): State<Db>, Path(id): Path<i64>) -> Json<Value> {
    Json(json!(db.read().await.ucs.filter_eq("curso_id", id)))
}

pub(crate) async fn units_by_instructor(State(db): State<Db>, Path(id): Path<i64>) -> Json<Value> {
    Json(json!(db.read().await.ucs.filter_eq("docente_id", id)))
}

pub(crate) async fn link_instructor(
    State(db): State<Db>,
    Path((id, docente_id)): Path<(i64, i64)>,
) -> ApiResult {
    let mut store = db.write().await;
    if !store.ucs.contains(id) {
        return Err(ApiError::not_found(Kind::Uc.not_found()));
    }
    if !store.docentes.contains(docente_id) {
        return Err(ApiError::not_found(Kind::Docente.not_found()));
    }
    if let Some(uc) = store.ucs.get_mut(id) {
        uc.insert("docente_id".to_string(), json!(docente_id));
    }
    Ok(Json(json!({ "message": "Docente vinculado à UC com sucesso" })))
}

pub(crate) async fn unlink_instructor(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult {
    let mut store = db.write().await;
    let uc = store
        .ucs
        .get_mut(id)
        .ok_or_else(|| ApiError::not_found(Kind::Uc.not_found()))?;
    uc.insert("docente_id".to_string(), Value::Null);
    Ok(Json(json!({ "message": "Docente desvinculado da UC com sucesso" })))
}

/// Create or replace the calendar of `(curso_id, mes, ano)`. Parameters
/// arrive in the query string, phases as a repeated key.
pub(crate) async fn generate_calendar(
    State(db): State<Db>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult {
    let int = |name: &str| {
        params
            .iter()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.parse::<i64>().ok())
            .ok_or_else(|| ApiError::unprocessable(format!("Parâmetro obrigatório ausente: {name}")))
    };
    let curso_id = int("curso_id")?;
    let mes = int("mes")?;
    let ano = int("ano")?;
    let fases: Vec<i64> = params
        .iter()
        .filter(|(k, _)| k == "fases_selecionadas")
        .filter_map(|(_, v)| v.parse().ok())
        .collect();

    let mut store = db.write().await;
    if !store.cursos.contains(curso_id) {
        return Err(ApiError::not_found(Kind::Curso.not_found()));
    }

    let mut row = Row::new();
    row.insert("curso_id".to_string(), json!(curso_id));
    row.insert("mes".to_string(), json!(mes));
    row.insert("ano".to_string(), json!(ano));
    row.insert("fases_selecionadas".to_string(), json!(fases));
    row.insert("eventos".to_string(), json!(phase_events(ano, mes, &fases)));

    let existing = find_calendar(&store, curso_id, ano, mes);
    let calendar = match existing {
        Some(id) => store.calendarios.merge(id, row),
        None => Some(store.calendarios.insert(row)),
    };
    calendar
        .map(|row| Json(Value::Object(row)))
        .ok_or_else(|| ApiError::not_found(Kind::Calendario.not_found()))
}

/// An opening class and an assessment per phase.
fn phase_events(ano: i64, mes: i64, fases: &[i64]) -> Vec<Value> {
    fases
        .iter()
        .flat_map(|fase| {
            [
                json!({
                    "id": format!("evento_{fase}_1"),
                    "title": "Aula inaugural",
                    "subtitle": format!("Fase {fase}"),
                    "date": format!("{ano}-{mes:02}-05"),
                    "type": "aula",
                }),
                json!({
                    "id": format!("evento_{fase}_2"),
                    "title": "Avaliação",
                    "subtitle": format!("Fase {fase}"),
                    "date": format!("{ano}-{mes:02}-15"),
                    "type": "avaliacao",
                }),
            ]
        })
        .collect()
}

fn find_calendar(store: &Store, curso_id: i64, ano: i64, mes: i64) -> Option<i64> {
    store
        .calendarios
        .rows()
        .find(|row| {
            row.get("curso_id").and_then(Value::as_i64) == Some(curso_id)
                && row.get("ano").and_then(Value::as_i64) == Some(ano)
                && row.get("mes").and_then(Value::as_i64) == Some(mes)
        })
        .and_then(|row| row.get("id").and_then(Value::as_i64))
}

pub(crate) async fn calendars_by_course(State(db): State<Db>, Path(id): Path<i64>) -> Json<Value> {
    Json(json!(db.read().await.calendarios.filter_eq("curso_id", id)))
}

pub(crate) async fn calendar_month(
    State(db): State<Db>,
    Path((curso_id, ano, mes)): Path<(i64, i64, i64)>,
) -> ApiResult {
    let store = db.read().await;
    find_calendar(&store, curso_id, ano, mes)
        .and_then(|id| store.calendarios.get(id))
        .map(|row| Json(Value::Object(row.clone())))
        .ok_or_else(|| ApiError::not_found("Calendário não encontrado para este período"))
}

pub(crate) async fn course_events(State(db): State<Db>, Path(id): Path<i64>) -> Json<Value> {
    let store = db.read().await;
    let eventos: Vec<Value> = store
        .calendarios
        .filter_eq("curso_id", id)
        .into_iter()
        .filter_map(|mut row| match row.remove("eventos") {
            Some(Value::Array(events)) => Some(events),
            _ => None,
        })
        .flatten()
        .collect();
    Json(json!({ "eventos": eventos }))
}
