use serde::Serialize;
use serde_json::Value;

use crate::client::ScheduleClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::Period;
use crate::transport::Transport;
use crate::Id;

/// `/alocacao` endpoints: automatic and manual assignment of instructors to
/// weekly time slots, plus the reports built on top of them.
///
/// `dia` is the weekday index (0 = Monday) and `horario` the slot index
/// within the day, as the service numbers them.
pub struct Allocation<'a, T> {
    client: &'a ScheduleClient<T>,
}

impl<'a, T: Transport> Allocation<'a, T> {
    pub(crate) fn new(client: &'a ScheduleClient<T>) -> Self {
        Self { client }
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        self.client.api_request(method, &format!("/alocacao{path}"))
    }

    /// Run the automatic allocation over `payload` for the given period.
    pub async fn process<B: Serialize + ?Sized>(
        &self,
        payload: &B,
        period: Period,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Post, "/processar")
            .with_pairs(period.pairs())
            .with_json(payload)?;
        self.client.execute(request).await
    }

    /// Day x slot matrix of the active allocations.
    pub async fn schedule_matrix(&self, period: Period) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, "/matriz-horarios")
            .with_pairs(period.pairs());
        self.client.execute(request).await
    }

    pub async fn instructor_availability(
        &self,
        docente_id: Id,
        dia: u8,
        horario: u8,
        period: Period,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, &format!("/disponibilidade/{docente_id}"))
            .with_query("dia", dia)
            .with_query("horario", horario)
            .with_pairs(period.pairs());
        self.client.execute(request).await
    }

    pub async fn existing_allocations(
        &self,
        dia: u8,
        horario: u8,
        period: Period,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, "/alocacoes-existentes")
            .with_query("dia", dia)
            .with_query("horario", horario)
            .with_pairs(period.pairs());
        self.client.execute(request).await
    }

    pub async fn create_manual<B: Serialize + ?Sized>(&self, allocation: &B) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Post, "/alocacao-manual")
            .with_json(allocation)?;
        self.client.execute(request).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, changes: &B) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Put, &format!("/alocacao/{id}"))
            .with_json(changes)?;
        self.client.execute(request).await
    }

    pub async fn delete(&self, id: Id) -> Result<Value, ApiError> {
        self.client
            .execute(self.request(HttpMethod::Delete, &format!("/alocacao/{id}")))
            .await
    }

    pub async fn instructor_report(&self, docente_id: Id, period: Period) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, &format!("/relatorio-docente/{docente_id}"))
            .with_pairs(period.pairs());
        self.client.execute(request).await
    }

    pub async fn statistics(&self, period: Period) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, "/estatisticas")
            .with_pairs(period.pairs());
        self.client.execute(request).await
    }
}
