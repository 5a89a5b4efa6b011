//! Instructor allocation over the weekly evening grid.
//!
//! Slots are `(dia, horario)` with `dia` in 0..5 (Monday to Friday) and
//! `horario` an index into `SLOTS`. An allocation occupies the slot whose
//! start time equals its `horario_inicio`. Deleting an allocation only marks
//! it inactive. The automatic pass is a plain first-fit, enough to give
//! clients realistic responses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::store::{Kind, Row, Store};
use crate::{object, ApiError, ApiResult, Db, PeriodQuery};

const DAYS: [&str; 5] = ["segunda", "terca", "quarta", "quinta", "sexta"];
const SLOTS: [&str; 4] = ["19:00", "20:00", "21:00", "22:00"];
const SLOT_ENDS: [&str; 4] = ["20:00", "21:00", "22:00", "23:00"];

#[derive(Debug, Deserialize)]
pub(crate) struct SlotQuery {
    dia: usize,
    horario: usize,
    ano: Option<i64>,
    mes: Option<i64>,
}

impl SlotQuery {
    fn period(&self) -> PeriodQuery {
        PeriodQuery {
            ano: self.ano,
            mes: self.mes,
        }
    }
}

fn int(row: &Row, field: &str) -> Option<i64> {
    row.get(field).and_then(Value::as_i64)
}

/// Active allocations, restricted to the period fields that are set.
fn active<'a>(store: &'a Store, period: PeriodQuery) -> impl Iterator<Item = &'a Row> {
    store.alocacoes.rows().filter(move |row| {
        row.get("ativa").and_then(Value::as_bool).unwrap_or(true)
            && period.ano.map_or(true, |ano| int(row, "ano") == Some(ano))
            && period.mes.map_or(true, |mes| int(row, "mes") == Some(mes))
    })
}

fn in_slot(row: &Row, dia: usize, horario: usize) -> bool {
    int(row, "dia_semana") == Some(dia as i64)
        && row.get("horario_inicio").and_then(Value::as_str) == SLOTS.get(horario).copied()
}

fn instructor_busy(
    store: &Store,
    period: PeriodQuery,
    docente_id: i64,
    dia: usize,
    horario: usize,
) -> bool {
    active(store, period)
        .any(|row| int(row, "docente_id") == Some(docente_id) && in_slot(row, dia, horario))
}

/// Whether the instructor's declared availability allows the weekday.
/// Days missing from the map count as available.
fn teaches_on(store: &Store, docente_id: i64, dia: usize) -> bool {
    store
        .docentes
        .get(docente_id)
        .and_then(|d| d.get("disponibilidade"))
        .and_then(|av| av.get(DAYS[dia]))
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

fn day_name(dia: usize) -> &'static str {
    DAYS.get(dia).copied().unwrap_or("Dia inválido")
}

fn slot_name(horario: usize) -> &'static str {
    SLOTS.get(horario).copied().unwrap_or("Horário inválido")
}

/// First-fit: every unit with an instructor and no active allocation in the
/// period gets the first free slot its instructor can teach.
fn allocate(store: &mut Store, period: PeriodQuery) -> Value {
    let pending: Vec<(i64, i64)> = {
        let snapshot: &Store = store;
        snapshot
            .ucs
            .rows()
            .filter_map(|uc| Some((int(uc, "id")?, int(uc, "docente_id")?)))
            .filter(|(uc_id, _)| {
                !active(snapshot, period).any(|row| int(row, "uc_id") == Some(*uc_id))
            })
            .collect()
    };

    let mut allocated = Vec::new();
    let mut unallocated = Vec::new();
    for (uc_id, docente_id) in pending {
        let slot = (0..DAYS.len())
            .flat_map(|dia| (0..SLOTS.len()).map(move |horario| (dia, horario)))
            .find(|&(dia, horario)| {
                teaches_on(store, docente_id, dia)
                    && !instructor_busy(store, period, docente_id, dia, horario)
            });
        match slot {
            Some((dia, horario)) => {
                let mut row = Row::new();
                row.insert("uc_id".to_string(), json!(uc_id));
                row.insert("docente_id".to_string(), json!(docente_id));
                row.insert("dia_semana".to_string(), json!(dia));
                row.insert("horario_inicio".to_string(), json!(SLOTS[horario]));
                row.insert("horario_fim".to_string(), json!(SLOT_ENDS[horario]));
                row.insert("ano".to_string(), json!(period.ano));
                row.insert("mes".to_string(), json!(period.mes));
                row.insert("ativa".to_string(), json!(true));
                allocated.push(Value::Object(store.alocacoes.insert(row)));
            }
            None => unallocated.push(json!(uc_id)),
        }
    }

    tracing::info!(
        allocated = allocated.len(),
        unallocated = unallocated.len(),
        "allocation pass finished"
    );
    json!({
        "status": "sucesso",
        "total_alocadas": allocated.len(),
        "alocacoes": allocated,
        "ucs_nao_alocadas": unallocated,
        "ano": period.ano,
        "mes": period.mes,
    })
}

pub(crate) async fn process(
    State(db): State<Db>,
    Query(period): Query<PeriodQuery>,
    Json(_input): Json<Value>,
) -> ApiResult {
    let resultado = allocate(&mut *db.write().await, period);
    Ok(Json(json!({
        "success": true,
        "resultado": resultado,
        "mensagem": "Alocação processada com sucesso",
    })))
}

/// Same pass as `process`, with the period taken from the JSON body.
pub(crate) async fn generate_from_calendar(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let body = object(body)?;
    let period = PeriodQuery {
        ano: int(&body, "ano"),
        mes: int(&body, "mes"),
    };
    let resultado = allocate(&mut *db.write().await, period);
    Ok(Json(json!({ "success": true, "resultado": resultado })))
}

pub(crate) async fn schedule_matrix(State(db): State<Db>, Query(period): Query<PeriodQuery>) -> Json<Value> {
    let store = db.read().await;
    let mut matrix = vec![vec![Vec::<Value>::new(); SLOTS.len()]; DAYS.len()];
    for row in active(&store, period) {
        let dia = int(row, "dia_semana").and_then(|d| usize::try_from(d).ok());
        let horario = row
            .get("horario_inicio")
            .and_then(Value::as_str)
            .and_then(|start| SLOTS.iter().position(|s| *s == start));
        if let (Some(dia), Some(horario)) = (dia, horario) {
            if dia < DAYS.len() {
                matrix[dia][horario].push(Value::Object(row.clone()));
            }
        }
    }
    Json(json!({
        "success": true,
        "matriz": matrix,
        "dias_semana": DAYS,
        "horarios": SLOTS,
        "ano": period.ano,
        "mes": period.mes,
    }))
}

pub(crate) async fn availability(
    State(db): State<Db>,
    Path(docente_id): Path<i64>,
    Query(slot): Query<SlotQuery>,
) -> Json<Value> {
    let store = db.read().await;
    let disponivel = slot.dia < DAYS.len()
        && slot.horario < SLOTS.len()
        && teaches_on(&store, docente_id, slot.dia)
        && !instructor_busy(&store, slot.period(), docente_id, slot.dia, slot.horario);
    Json(json!({
        "success": true,
        "disponivel": disponivel,
        "docente_id": docente_id,
        "dia": slot.dia,
        "horario": slot.horario,
        "dia_nome": day_name(slot.dia),
        "horario_nome": slot_name(slot.horario),
    }))
}

pub(crate) async fn existing(State(db): State<Db>, Query(slot): Query<SlotQuery>) -> Json<Value> {
    let store = db.read().await;
    let alocacoes: Vec<Value> = active(&store, slot.period())
        .filter(|row| in_slot(row, slot.dia, slot.horario))
        .map(|row| json!({ "docente_id": row.get("docente_id"), "uc_id": row.get("uc_id") }))
        .collect();
    Json(json!({
        "success": true,
        "alocacoes": alocacoes,
        "dia": slot.dia,
        "horario": slot.horario,
        "dia_nome": day_name(slot.dia),
        "horario_nome": slot_name(slot.horario),
    }))
}

pub(crate) async fn create_manual(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    let mut row = object(body)?;
    for field in ["uc_id", "docente_id", "dia_semana", "horario_inicio", "horario_fim"] {
        if row.get(field).map_or(true, Value::is_null) {
            return Err(ApiError::unprocessable(format!("Campo obrigatório ausente: {field}")));
        }
    }

    let mut store = db.write().await;
    let docente_id = int(&row, "docente_id").unwrap_or_default();
    if !store.docentes.contains(docente_id) {
        return Err(ApiError::not_found(Kind::Docente.not_found()));
    }
    if !store.ucs.contains(int(&row, "uc_id").unwrap_or_default()) {
        return Err(ApiError::not_found(Kind::Uc.not_found()));
    }

    let period = PeriodQuery {
        ano: int(&row, "ano"),
        mes: int(&row, "mes"),
    };
    let clash = active(&store, period).any(|existing| {
        int(existing, "docente_id") == Some(docente_id)
            && existing.get("dia_semana") == row.get("dia_semana")
            && existing.get("horario_inicio") == row.get("horario_inicio")
    });
    if clash {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Docente já possui alocação neste horário",
        ));
    }

    row.entry("ativa").or_insert(json!(true));
    Ok(Json(Value::Object(store.alocacoes.insert(row))))
}

pub(crate) async fn update(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    let changes = object(body)?;
    db.write()
        .await
        .alocacoes
        .merge(id, changes)
        .map(|row| Json(Value::Object(row)))
        .ok_or_else(|| ApiError::not_found("Alocação não encontrada"))
}

pub(crate) async fn delete(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult {
    let mut store = db.write().await;
    let row = store
        .alocacoes
        .get_mut(id)
        .ok_or_else(|| ApiError::not_found("Alocação não encontrada"))?;
    row.insert("ativa".to_string(), json!(false));
    Ok(Json(json!({ "success": true, "mensagem": "Alocação removida com sucesso" })))
}

pub(crate) async fn instructor_report(
    State(db): State<Db>,
    Path(docente_id): Path<i64>,
    Query(period): Query<PeriodQuery>,
) -> ApiResult {
    let store = db.read().await;
    let docente = store
        .docentes
        .get(docente_id)
        .ok_or_else(|| ApiError::not_found(Kind::Docente.not_found()))?;
    let alocacoes: Vec<Value> = active(&store, period)
        .filter(|row| int(row, "docente_id") == Some(docente_id))
        .map(|row| Value::Object(row.clone()))
        .collect();
    Ok(Json(json!({
        "success": true,
        "relatorio": {
            "docente": docente,
            "total_alocacoes": alocacoes.len(),
            "alocacoes": alocacoes,
            "ano": period.ano,
            "mes": period.mes,
        }
    })))
}

pub(crate) async fn statistics(State(db): State<Db>, Query(period): Query<PeriodQuery>) -> Json<Value> {
    let store = db.read().await;
    let rows: Vec<&Row> = active(&store, period).collect();
    let distinct = |field: &str| {
        let mut ids: Vec<i64> = rows.iter().filter_map(|row| int(row, field)).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    };
    Json(json!({
        "success": true,
        "estatisticas": {
            "total_alocacoes": rows.len(),
            "docentes_com_alocacoes": distinct("docente_id"),
            "ucs_alocadas": distinct("uc_id"),
            "total_docentes": store.docentes.rows().count(),
            "total_ucs": store.ucs.rows().count(),
            "ano": period.ano,
            "mes": period.mes,
        }
    }))
}
