use serde::Serialize;
use serde_json::Value;

use super::Collection;
use crate::client::ScheduleClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Page;
use crate::transport::Transport;
use crate::types::CalendarGeneration;
use crate::Id;

/// `/calendario` endpoints.
pub struct Calendar<'a, T> {
    inner: Collection<'a, T>,
}

impl<'a, T: Transport> Calendar<'a, T> {
    pub(crate) fn new(client: &'a ScheduleClient<T>) -> Self {
        Self {
            inner: Collection::new(client, "/calendario"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.inner.list(page).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, calendar: &B) -> Result<Value, ApiError> {
        self.inner.create(calendar).await
    }

    pub async fn get(&self, id: Id) -> Result<Value, ApiError> {
        self.inner.get(id).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, changes: &B) -> Result<Value, ApiError> {
        self.inner.update(id, changes).await
    }

    pub async fn delete(&self, id: Id) -> Result<Value, ApiError> {
        self.inner.delete(id).await
    }

    /// Generate (or regenerate) a course's calendar for one month. The
    /// parameters travel in the query string; the request has no body.
    pub async fn generate(&self, params: &CalendarGeneration) -> Result<Value, ApiError> {
        let client = self.inner.client;
        let request = client
            .api_request(HttpMethod::Post, "/calendario/gerar")
            .with_pairs(params.pairs());
        client.execute(request).await
    }

    pub async fn by_course(&self, curso_id: Id) -> Result<Value, ApiError> {
        self.inner
            .get_path(&format!("/calendario/por-curso/{curso_id}"))
            .await
    }

    pub async fn month_view(&self, curso_id: Id, ano: i32, mes: u32) -> Result<Value, ApiError> {
        self.inner
            .get_path(&format!("/calendario/calendario-mes/{curso_id}/{ano}/{mes}"))
            .await
    }

    /// All events of every calendar of the course.
    pub async fn course_events(&self, curso_id: Id) -> Result<Value, ApiError> {
        self.inner
            .get_path(&format!("/calendario/eventos/{curso_id}"))
            .await
    }

    pub async fn generate_automatic_allocation<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Value, ApiError> {
        let client = self.inner.client;
        let request = client
            .api_request(HttpMethod::Post, "/calendario/gerar-alocacao-automatica")
            .with_json(payload)?;
        client.execute(request).await
    }
}
