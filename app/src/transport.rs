//! Blocking `Transport` backed by ureq.

use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::trace;

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `timeout` bounds each whole request; `None` waits forever.
    pub fn new(timeout: Option<Duration>) -> Self {
        // Status codes are data for the core, never transport errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(Duration::from_secs(10)))
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        trace!(method = %req.method, path = %req.path, "executing");
        let agent = &self.agent;
        let path = req.path.as_str();
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(path).call(),
            (HttpMethod::Delete, _) => agent.delete(path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(path).send_empty(),
            (HttpMethod::Patch, Some(body)) => agent
                .patch(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => agent.patch(path).send_empty(),
        };

        let mut response = result.map_err(ApiError::network)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(ApiError::network)?;
        Ok(HttpResponse::new(status, body))
    }
}
