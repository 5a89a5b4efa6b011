//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every endpoint group
//! of `ScheduleClient` over real HTTP through the reqwest transport. Checks
//! that paths, query strings and bodies line up with what the server routes,
//! and that server errors surface with their `detail` message.

use agenda_core::error::CONNECTIVITY_ERROR_MESSAGE;
use agenda_core::{
    ApiError, CalendarGeneration, ClientConfig, CourseUpdate, ErrorKind, InstructorUpdate,
    NewAllocation, NewCourse, NewInstructor, NewUnit, Page, Period, ScheduleClient,
};
use serde_json::{json, Value};

async fn start_server() -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

fn id_of(value: &Value) -> i64 {
    value["id"].as_i64().expect("response carries an integer id")
}

#[tokio::test(flavor = "multi_thread")]
async fn scheduling_lifecycle() {
    let addr = start_server().await;
    let client = ScheduleClient::new(ClientConfig::new(&format!("http://{addr}"))).unwrap();

    // Health lives at the origin, not under /api.
    let health = client.health().check().await.unwrap();
    assert_eq!(health, json!({"status": "healthy"}));

    // Courses.
    assert_eq!(client.courses().list(Page::default()).await.unwrap(), json!([]));
    let course = client
        .courses()
        .create(&NewCourse {
            nome: "Análise e Desenvolvimento de Sistemas".to_string(),
            carga_horaria: 2000,
            fases: Some("1,2,3".to_string()),
        })
        .await
        .unwrap();
    let curso_id = id_of(&course);
    let renamed = client
        .courses()
        .update(
            curso_id,
            &CourseUpdate {
                nome: Some("ADS".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed["nome"], "ADS");
    assert_eq!(renamed["carga_horaria"], 2000);

    // Instructors.
    let instructor = client
        .instructors()
        .create(&NewInstructor {
            nome: "Ana".to_string(),
            email: Some("ana@example.edu".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let docente_id = id_of(&instructor);
    client
        .instructors()
        .update(
            docente_id,
            &InstructorUpdate {
                especialidade: Some("Redes".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let availability = client.instructors().availability(docente_id).await.unwrap();
    assert_eq!(availability["disponibilidade"], json!({}));

    // Units, linked and unlinked.
    let unit = client
        .units()
        .create(&NewUnit {
            nome: "Redes de Computadores".to_string(),
            carga_horaria: 60,
            docente_id: None,
            curso_id: Some(curso_id),
        })
        .await
        .unwrap();
    let uc_id = id_of(&unit);
    assert_eq!(
        client.courses().units(curso_id).await.unwrap().as_array().map(Vec::len),
        Some(1)
    );
    assert_eq!(
        client.units().by_course(curso_id).await.unwrap().as_array().map(Vec::len),
        Some(1)
    );

    client.units().link_instructor(uc_id, docente_id).await.unwrap();
    assert_eq!(client.units().get(uc_id).await.unwrap()["docente_id"], docente_id);
    assert_eq!(
        client.instructors().units(docente_id).await.unwrap().as_array().map(Vec::len),
        Some(1)
    );
    client.units().unlink_instructor(uc_id).await.unwrap();
    assert_eq!(
        client.units().by_instructor(docente_id).await.unwrap(),
        json!([])
    );
    client.units().link_instructor(uc_id, docente_id).await.unwrap();

    // Calendar.
    let generated = client
        .calendar()
        .generate(&CalendarGeneration {
            curso_id,
            mes: 3,
            ano: 2025,
            fases_selecionadas: vec![1, 2],
        })
        .await
        .unwrap();
    assert_eq!(generated["fases_selecionadas"], json!([1, 2]));
    let month = client.calendar().month_view(curso_id, 2025, 3).await.unwrap();
    assert_eq!(month["id"], generated["id"]);
    assert_eq!(
        client.calendar().by_course(curso_id).await.unwrap().as_array().map(Vec::len),
        Some(1)
    );
    let events = client.calendar().course_events(curso_id).await.unwrap();
    assert_eq!(events["eventos"].as_array().map(Vec::len), Some(4));
    assert_eq!(
        client.calendar().list(Page::new(0, 10)).await.unwrap().as_array().map(Vec::len),
        Some(1)
    );

    // Allocation.
    let march = Period::month(2025, 3);
    let run = client.allocation().process(&json!({}), march).await.unwrap();
    assert_eq!(run["success"], true);
    assert_eq!(run["resultado"]["total_alocadas"], 1);

    let matrix = client.allocation().schedule_matrix(march).await.unwrap();
    assert_eq!(matrix["matriz"][0][0][0]["uc_id"], uc_id);

    let busy = client
        .allocation()
        .instructor_availability(docente_id, 0, 0, march)
        .await
        .unwrap();
    assert_eq!(busy["disponivel"], false);
    let existing = client
        .allocation()
        .existing_allocations(0, 0, Period::any())
        .await
        .unwrap();
    assert_eq!(existing["alocacoes"], json!([{"docente_id": docente_id, "uc_id": uc_id}]));

    let manual = client
        .allocation()
        .create_manual(&NewAllocation {
            uc_id,
            docente_id,
            dia_semana: 2,
            horario_inicio: "20:00".to_string(),
            horario_fim: "21:00".to_string(),
            data_alocacao: "2025-03-05T20:00:00".to_string(),
            mes: 3,
            ano: 2025,
            ativa: true,
        })
        .await
        .unwrap();
    let manual_id = id_of(&manual);

    let clash = client
        .allocation()
        .create_manual(&serde_json::from_value::<NewAllocation>(json!({
            "uc_id": uc_id, "docente_id": docente_id, "dia_semana": 2,
            "horario_inicio": "20:00", "horario_fim": "21:00",
            "data_alocacao": "2025-03-05T20:00:00", "mes": 3, "ano": 2025
        })).unwrap())
        .await
        .unwrap_err();
    assert_eq!(clash.status(), Some(400));
    assert_eq!(clash.message(), "Docente já possui alocação neste horário");

    let report = client
        .allocation()
        .instructor_report(docente_id, march)
        .await
        .unwrap();
    assert_eq!(report["relatorio"]["total_alocacoes"], 2);

    client.allocation().delete(manual_id).await.unwrap();
    let stats = client.allocation().statistics(march).await.unwrap();
    assert_eq!(stats["estatisticas"]["total_alocacoes"], 1);

    // Delete, then observe the not-found detail.
    client.units().delete(uc_id).await.unwrap();
    client.instructors().delete(docente_id).await.unwrap();
    client.courses().delete(curso_id).await.unwrap();

    let err = client.courses().get(curso_id).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 404,
            message: "Curso não encontrado".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::Server);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_month_view_reports_detail() {
    let addr = start_server().await;
    let client = ScheduleClient::new(ClientConfig::new(&format!("http://{addr}"))).unwrap();

    let err = client.calendar().month_view(1, 2025, 3).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "Calendário não encontrado para este período");
}

#[tokio::test(flavor = "multi_thread")]
async fn stopped_server_is_a_connectivity_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = ScheduleClient::new(ClientConfig::new(&format!("http://{addr}"))).unwrap();

    let err = client.health().check().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert_eq!(err.message(), CONNECTIVITY_ERROR_MESSAGE);
}
