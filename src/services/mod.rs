//! Service wrappers over the admission backend's REST API.
//!
//! Each trait method maps to exactly one endpoint. [`BackendClient`] is the
//! HTTP implementation of all three traits; views only see the traits, so
//! tests can stand in their own backend.

mod admission;
mod application;
mod payment;

pub use admission::AdmissionService;
pub use application::ApplicationService;
pub use payment::PaymentService;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::PortalConfig;
use crate::error::{PortalError, Result};

/// Thin `reqwest` client bound to one backend base URL.
/// No retries, caching or auth headers.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base: Url,
}

impl BackendClient {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| PortalError::Transport {
                url: config.api_base_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL plus the given path segments, each escaped as one segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| PortalError::Config(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<(Url, StatusCode, String)>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(segments)?;
        debug!(method = %method, url = %url, "backend request");

        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let transport = |source| PortalError::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        debug!(url = %url, status = status.as_u16(), bytes = text.len(), "backend response");
        Ok((url, status, text))
    }

    /// GET a collection. An empty body (e.g. 204) or `null` is an empty list.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>> {
        let (url, status, text) = self.send(Method::GET, segments, None::<&()>).await?;
        ensure_success("GET", &url, status)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        decode::<Option<Vec<T>>>(&url, &text).map(Option::unwrap_or_default)
    }

    /// GET a single record. 404, an empty body and `null` all mean "none".
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>> {
        let (url, status, text) = self.send(Method::GET, segments, None::<&()>).await?;
        if status == StatusCode::NOT_FOUND || (status.is_success() && text.trim().is_empty()) {
            return Ok(None);
        }
        ensure_success("GET", &url, status)?;
        decode(&url, &text)
    }

    pub(crate) async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let (url, status, text) = self.send(Method::POST, segments, Some(body)).await?;
        ensure_success("POST", &url, status)?;
        decode(&url, &text)
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<()> {
        let (url, status, _) = self.send(Method::DELETE, segments, None::<&()>).await?;
        ensure_success("DELETE", &url, status)
    }
}

fn ensure_success(method: &'static str, url: &Url, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(PortalError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

fn decode<T: DeserializeOwned>(url: &Url, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| PortalError::Decode {
        url: url.to_string(),
        source,
    })
}
