use serde::Serialize;
use serde_json::Value;

use super::Collection;
use crate::client::ScheduleClient;
use crate::error::ApiError;
use crate::params::Page;
use crate::transport::Transport;
use crate::Id;

/// `/cursos` endpoints.
pub struct Courses<'a, T> {
    inner: Collection<'a, T>,
}

impl<'a, T: Transport> Courses<'a, T> {
    pub(crate) fn new(client: &'a ScheduleClient<T>) -> Self {
        Self {
            inner: Collection::new(client, "/cursos"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ApiError> {
        self.inner.list(page).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, course: &B) -> Result<Value, ApiError> {
        self.inner.create(course).await
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

    /// Teaching units that belong to the course.
    pub async fn units(&self, id: Id) -> Result<Value, ApiError> {
        self.inner.get_path(&format!("/cursos/{id}/ucs")).await
    }
}
