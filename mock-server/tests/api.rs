use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Send one request through a shared router and return status + JSON body.
async fn call(app: &mut Router, request: Request<String>) -> (StatusCode, Value) {
    let resp = ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

// --- health ---

#[tokio::test]
async fn health_is_served_at_root() {
    let resp = app().oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn health_is_not_under_api_prefix() {
    let resp = app().oneshot(empty_request("GET", "/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- courses ---

#[tokio::test]
async fn list_courses_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/cursos/?skip=0&limit=100"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn get_course_not_found_has_detail() {
    let resp = app().oneshot(empty_request("GET", "/api/cursos/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"detail": "Curso não encontrado"}));
}

#[tokio::test]
async fn create_course_missing_field_is_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/cursos/", r#"{"nome":"ADS"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Campo obrigatório ausente: carga_horaria");
}

#[tokio::test]
async fn get_course_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/cursos/not-a-number"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_respects_skip_and_limit() {
    let mut app = app();
    for nome in ["A", "B", "C"] {
        let body = json!({"nome": nome, "carga_horaria": 100}).to_string();
        call(&mut app, json_request("POST", "/api/cursos/", &body)).await;
    }
    let (status, body) = call(&mut app, empty_request("GET", "/api/cursos/?skip=1&limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["nome"], "B");
}

// --- units ---

#[tokio::test]
async fn create_unit_with_unknown_course_is_404() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/ucs/",
            r#"{"nome":"Redes","carga_horaria":60,"curso_id":9}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["detail"], "Curso não encontrado");
}

#[tokio::test]
async fn link_and_unlink_instructor() {
    let mut app = app();
    call(&mut app, json_request("POST", "/api/docentes/", r#"{"nome":"Ana"}"#)).await;
    call(
        &mut app,
        json_request("POST", "/api/ucs/", r#"{"nome":"Redes","carga_horaria":60}"#),
    )
    .await;

    let (status, _) = call(&mut app, empty_request("PUT", "/api/ucs/1/vincular-docente/1")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, units) = call(&mut app, empty_request("GET", "/api/ucs/por-docente/1")).await;
    assert_eq!(units.as_array().unwrap().len(), 1);

    let (status, _) = call(&mut app, empty_request("PUT", "/api/ucs/1/desvincular-docente")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, unit) = call(&mut app, empty_request("GET", "/api/ucs/1")).await;
    assert_eq!(unit["docente_id"], Value::Null);
}

#[tokio::test]
async fn link_unknown_instructor_is_404() {
    let mut app = app();
    call(
        &mut app,
        json_request("POST", "/api/ucs/", r#"{"nome":"Redes","carga_horaria":60}"#),
    )
    .await;
    let (status, body) = call(&mut app, empty_request("PUT", "/api/ucs/1/vincular-docente/5")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Docente não encontrado");
}

// --- calendar ---

#[tokio::test]
async fn generate_calendar_reads_repeated_phases() {
    let mut app = app();
    call(
        &mut app,
        json_request("POST", "/api/cursos/", r#"{"nome":"ADS","carga_horaria":2000}"#),
    )
    .await;

    let (status, calendar) = call(
        &mut app,
        empty_request(
            "POST",
            "/api/calendario/gerar?curso_id=1&mes=3&ano=2025&fases_selecionadas=1&fases_selecionadas=2",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(calendar["fases_selecionadas"], json!([1, 2]));
    assert_eq!(calendar["eventos"].as_array().unwrap().len(), 4);

    let (status, month) = call(&mut app, empty_request("GET", "/api/calendario/calendario-mes/1/2025/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(month["id"], calendar["id"]);

    let (_, events) = call(&mut app, empty_request("GET", "/api/calendario/eventos/1")).await;
    assert_eq!(events["eventos"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn regenerating_replaces_the_month() {
    let mut app = app();
    call(
        &mut app,
        json_request("POST", "/api/cursos/", r#"{"nome":"ADS","carga_horaria":2000}"#),
    )
    .await;
    let uri = "/api/calendario/gerar?curso_id=1&mes=3&ano=2025&fases_selecionadas=1";
    call(&mut app, empty_request("POST", uri)).await;
    call(&mut app, empty_request("POST", uri)).await;

    let (_, calendars) = call(&mut app, empty_request("GET", "/api/calendario/por-curso/1")).await;
    assert_eq!(calendars.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_month_view_is_404() {
    let (status, body) = call(&mut app(), empty_request("GET", "/api/calendario/calendario-mes/1/2025/3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Calendário não encontrado para este período");
}

// --- allocation ---

#[tokio::test]
async fn manual_allocation_rejects_clash() {
    let mut app = app();
    call(&mut app, json_request("POST", "/api/docentes/", r#"{"nome":"Ana"}"#)).await;
    call(
        &mut app,
        json_request("POST", "/api/ucs/", r#"{"nome":"Redes","carga_horaria":60}"#),
    )
    .await;
    let allocation = r#"{"uc_id":1,"docente_id":1,"dia_semana":2,"horario_inicio":"19:00",
        "horario_fim":"20:00","data_alocacao":"2025-03-05T19:00:00","mes":3,"ano":2025}"#;

    let (status, created) = call(&mut app, json_request("POST", "/api/alocacao/alocacao-manual", allocation)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["ativa"], true);

    let (status, body) = call(&mut app, json_request("POST", "/api/alocacao/alocacao-manual", allocation)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Docente já possui alocação neste horário");
}

#[tokio::test]
async fn delete_allocation_marks_it_inactive() {
    let mut app = app();
    call(&mut app, json_request("POST", "/api/docentes/", r#"{"nome":"Ana"}"#)).await;
    call(
        &mut app,
        json_request("POST", "/api/ucs/", r#"{"nome":"Redes","carga_horaria":60,"docente_id":1}"#),
    )
    .await;
    let (_, run) = call(
        &mut app,
        json_request("POST", "/api/alocacao/processar?ano=2025&mes=3", "{}"),
    )
    .await;
    assert_eq!(run["resultado"]["total_alocadas"], 1);

    let (status, _) = call(&mut app, empty_request("DELETE", "/api/alocacao/alocacao/1")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = call(&mut app, empty_request("GET", "/api/alocacao/estatisticas?ano=2025&mes=3")).await;
    assert_eq!(stats["estatisticas"]["total_alocacoes"], 0);
}

#[tokio::test]
async fn availability_reflects_allocations() {
    let mut app = app();
    call(&mut app, json_request("POST", "/api/docentes/", r#"{"nome":"Ana"}"#)).await;
    call(
        &mut app,
        json_request("POST", "/api/ucs/", r#"{"nome":"Redes","carga_horaria":60,"docente_id":1}"#),
    )
    .await;
    call(&mut app, json_request("POST", "/api/alocacao/processar", "{}")).await;

    let (_, busy) = call(&mut app, empty_request("GET", "/api/alocacao/disponibilidade/1?dia=0&horario=0")).await;
    assert_eq!(busy["disponivel"], false);
    let (_, free) = call(&mut app, empty_request("GET", "/api/alocacao/disponibilidade/1?dia=0&horario=1")).await;
    assert_eq!(free["disponivel"], true);

    let (_, existing) = call(&mut app, empty_request("GET", "/api/alocacao/alocacoes-existentes?dia=0&horario=0")).await;
    assert_eq!(existing["alocacoes"], json!([{"docente_id": 1, "uc_id": 1}]));
}

#[tokio::test]
async fn instructor_report_for_unknown_instructor_is_404() {
    let (status, body) = call(&mut app(), empty_request("GET", "/api/alocacao/relatorio-docente/3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Docente não encontrado");
}

#[tokio::test]
async fn statistics_summarize_the_period() {
    let mut app = app();
    call(&mut app, json_request("POST", "/api/docentes/", r#"{"nome":"Ana"}"#)).await;
    call(&mut app, json_request("POST", "/api/docentes/", r#"{"nome":"Bruno"}"#)).await;
    for body in [
        r#"{"nome":"Redes","carga_horaria":60,"docente_id":1}"#,
        r#"{"nome":"Algoritmos","carga_horaria":80,"docente_id":1}"#,
        r#"{"nome":"Banco de Dados","carga_horaria":60}"#,
    ] {
        call(&mut app, json_request("POST", "/api/ucs/", body)).await;
    }
    call(
        &mut app,
        json_request("POST", "/api/alocacao/processar?ano=2025&mes=3", "{}"),
    )
    .await;

    let (status, body) = call(
        &mut app,
        empty_request("GET", "/api/alocacao/estatisticas?ano=2025&mes=3"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["estatisticas"],
        json!({
            "total_alocacoes": 2,
            "docentes_com_alocacoes": 1,
            "ucs_alocadas": 2,
            "total_docentes": 2,
            "total_ucs": 3,
            "ano": 2025,
            "mes": 3,
        })
    );

    let (_, other_month) = call(
        &mut app,
        empty_request("GET", "/api/alocacao/estatisticas?ano=2025&mes=4"),
    )
    .await;
    assert_eq!(other_month["estatisticas"]["total_alocacoes"], 0);
}
