use serde_json::Value;

use crate::client::ScheduleClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;

/// Liveness probe. Served at the origin root, outside the `/api` prefix.
pub struct Health<'a, T> {
    client: &'a ScheduleClient<T>,
}

impl<'a, T: Transport> Health<'a, T> {
    pub(crate) fn new(client: &'a ScheduleClient<T>) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> Result<Value, ApiError> {
        self.client
            .execute(self.client.root_request(HttpMethod::Get, "/health"))
            .await
    }
}
