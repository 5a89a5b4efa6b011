use serde::Serialize;
use serde_json::Value;

use super::Collection;
use crate::client::ScheduleClient;
use crate::error::ApiError;
use crate::params::Page;
use crate::transport::Transport;
use crate::Id;

/// `/docentes` endpoints.
pub struct Instructors<'a, T> {
    inner: Collection<'a, T>,
}

impl<'a, T: Transport> Instructors<'a, T> {
    pub(crate) fn new(client: &'a ScheduleClient<T>) -> Self {
        Self {
            inner: Collection::new(client, "/docentes"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.inner.list(page).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, instructor: &B) -> Result<Value, ApiError> {
        self.inner.create(instructor).await
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

    /// Weekly availability grid of the instructor.
    pub async fn availability(&self, id: Id) -> Result<Value, ApiError> {
        self.inner
            .get_path(&format!("/docentes/{id}/disponibilidade"))
            .await
    }

    pub async fn units(&self, id: Id) -> Result<Value, ApiError> {
        self.inner.get_path(&format!("/docentes/{id}/ucs")).await
    }
}
