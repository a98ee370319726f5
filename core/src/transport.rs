//! Executes `HttpRequest` values against the network.
//!
//! The session never performs I/O itself; `TodoListController` hands each
//! request to a `Transport` and feeds the result back. Non-2xx statuses are
//! returned as data so the client can classify them; `Err` means no response
//! was received at all.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use tracing::trace;

    use super::Transport;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a ureq agent.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        /// `timeout` bounds the whole round-trip; `None` waits forever.
        pub fn new(timeout: Option<Duration>) -> Self {
            // 4xx/5xx come back as responses, not errors
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self { agent }
        }

        pub fn from_config(config: &ClientConfig) -> Self {
            Self::new(config.timeout)
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new(ClientConfig::default().timeout)
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            let content_type = request
                .headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
                .map_or("application/json", |(_, v)| v.as_str());
            let path = request.path.as_str();

            let result = match (request.method, request.body.as_deref()) {
                (HttpMethod::Get, _) => self.agent.get(path).call(),
                (HttpMethod::Delete, _) => self.agent.delete(path).call(),
                (HttpMethod::Post, Some(body)) => self
                    .agent
                    .post(path)
                    .content_type(content_type)
                    .send(body.as_bytes()),
                (HttpMethod::Post, None) => self.agent.post(path).send_empty(),
                (HttpMethod::Put, Some(body)) => self
                    .agent
                    .put(path)
                    .content_type(content_type)
                    .send(body.as_bytes()),
                (HttpMethod::Put, None) => self.agent.put(path).send_empty(),
            };
            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            trace!(method = %request.method, path, status, "round-trip finished");

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
