//! How a client reaches the procedure layer.

use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;

use super::error::ClientError;
use crate::rpc::{CommandRequest, CommandResponse, Service};

/// One request/response round-trip.
///
/// `Err` means the round-trip itself failed; a procedure error comes back
/// as `Ok` with a non-success status. The client runs on a single event
/// loop, so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait Transport {
    async fn call(&self, request: CommandRequest) -> Result<CommandResponse, ClientError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn call(&self, request: CommandRequest) -> Result<CommandResponse, ClientError> {
        (**self).call(request).await
    }
}

/// Dispatches into an in-process service.
pub struct LocalTransport<R> {
    service: Arc<Service<R>>,
}

impl<R> LocalTransport<R> {
    pub fn new(service: Arc<Service<R>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<Service<R>> {
        &self.service
    }
}

impl<R> Clone for LocalTransport<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[async_trait(?Send)]
impl<R: Send + Sync + 'static> Transport for LocalTransport<R> {
    async fn call(&self, request: CommandRequest) -> Result<CommandResponse, ClientError> {
        Ok(self.service.dispatch_request(&request))
    }
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use async_trait::async_trait;
    use serde_json::Value;

    use super::Transport;
    use crate::client::ClientError;
    use crate::rpc::{CommandRequest, CommandResponse};

    /// Posts calls to a server started with [`crate::rpc::serve`].
    #[derive(Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
        base_url: String,
    }

    impl HttpTransport {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self::with_client(reqwest::Client::new(), base_url)
        }

        pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
            Self {
                client,
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }
        }
    }

    #[async_trait(?Send)]
    impl Transport for HttpTransport {
        async fn call(&self, request: CommandRequest) -> Result<CommandResponse, ClientError> {
            let mut builder = self
                .client
                .post(format!("{}/{}", self.base_url, request.command))
                .json(&request.input);
            for (name, value) in &request.session_variables {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .json::<Value>()
                .await
                .map_err(|e| ClientError::Transport(format!("unreadable response: {e}")))?;

            Ok(CommandResponse { status, body })
        }
    }
}
