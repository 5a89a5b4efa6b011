//! Endpoint groups, one per resource family of the scheduling API.
//!
//! Each group borrows the `ScheduleClient` and exposes thin async methods:
//! build the path and query, send once, return the parsed body unchanged.
//! The four CRUD collections share `Collection` for their common verbs.

mod allocation;
mod calendar;
mod courses;
mod health;
mod instructors;
mod units;

pub use allocation::Allocation;
pub use calendar::Calendar;
pub use courses::Courses;
pub use health::Health;
pub use instructors::Instructors;
pub use units::Units;

use serde::Serialize;
use serde_json::Value;

use crate::client::ScheduleClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Page;
use crate::transport::Transport;
use crate::Id;

/// List/create/get/update/delete under one collection path such as `/cursos`.
struct Collection<'a, T> {
    client: &'a ScheduleClient<T>,
    base: &'static str,
}

impl<'a, T: Transport> Collection<'a, T> {
    fn new(client: &'a ScheduleClient<T>, base: &'static str) -> Self {
        Self { client, base }
    }

    fn item(&self, id: Id) -> String {
        format!("{}/{id}", self.base)
    }

    async fn get_path(&self, path: &str) -> Result<Value, ApiError> {
        self.client
            .execute(self.client.api_request(HttpMethod::Get, path))
            .await
    }

    async fn list(&self, page: Page) -> Result<Value, ApiError> {
        let request = self
            .client
            .api_request(HttpMethod::Get, &format!("{}/", self.base))
            .with_pairs(page.pairs());
        self.client.execute(request).await
    }

    async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        let request = self
            .client
            .api_request(HttpMethod::Post, &format!("{}/", self.base))
            .with_json(body)?;
        self.client.execute(request).await
    }

    async fn get(&self, id: Id) -> Result<Value, ApiError> {
        self.get_path(&self.item(id)).await
    }

    async fn update<B: Serialize + ?Sized>(&self, id: Id, body: &B) -> Result<Value, ApiError> {
        let request = self
            .client
            .api_request(HttpMethod::Put, &self.item(id))
            .with_json(body)?;
        self.client.execute(request).await
    }

    async fn delete(&self, id: Id) -> Result<Value, ApiError> {
        self.client
            .execute(self.client.api_request(HttpMethod::Delete, &self.item(id)))
            .await
    }
}
