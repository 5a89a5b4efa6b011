use serde::Serialize;
use serde_json::Value;

use super::Collection;
use crate::client::ScheduleClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Page;
use crate::transport::Transport;
use crate::Id;

/// `/ucs` endpoints (teaching units).
pub struct Units<'a, T> {
    inner: Collection<'a, T>,
}

impl<'a, T: Transport> Units<'a, T> {
    pub(crate) fn new(client: &'a ScheduleClient<T>) -> Self {
        Self {
            inner: Collection::new(client, "/ucs"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.inner.list(page).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, unit: &B) -> Result<Value, ApiError> {
        self.inner.create(unit).await
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

    pub async fn by_course(&self, curso_id: Id) -> Result<Value, ApiError> {
        self.inner.get_path(&format!("/ucs/por-curso/{curso_id}")).await
    }

    pub async fn by_instructor(&self, docente_id: Id) -> Result<Value, ApiError> {
        self.inner
            .get_path(&format!("/ucs/por-docente/{docente_id}"))
            .await
    }

    /// Assign an instructor to the unit. Sent without a body.
    pub async fn link_instructor(&self, uc_id: Id, docente_id: Id) -> Result<Value, ApiError> {
        let client = self.inner.client;
        let path = format!("/ucs/{uc_id}/vincular-docente/{docente_id}");
        client
            .execute(client.api_request(HttpMethod::Put, &path))
            .await
    }

    /// Clear the unit's instructor. Sent without a body.
    pub async fn unlink_instructor(&self, uc_id: Id) -> Result<Value, ApiError> {
        let client = self.inner.client;
        let path = format!("/ucs/{uc_id}/desvincular-docente");
        client
            .execute(client.api_request(HttpMethod::Put, &path))
            .await
    }
}
