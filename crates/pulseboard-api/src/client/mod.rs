// REST API client modules
//
// Hand-written client for the Pulseboard backend's REST endpoints. Every
// response is wrapped in the standard `{ data, success, message?, timestamp }`
// envelope (plus a `pagination` block on paged lists); the helpers here strip
// it before callers see the payload.

pub mod alerts;
pub mod auth;
pub mod groups;
pub mod hosts;
pub mod metrics;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::envelope::{ApiResponse, Page, PaginatedResponse};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Pulseboard backend.
///
/// Stateless: holds no entity data, only the transport and the bearer
/// credential injected into every request. The central store is the sole
/// destination for fetched results.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    credential: SecretString,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `https://dash.example.com`);
    /// endpoint paths are appended under `/api/`.
    pub fn new(
        base_url: Url,
        credential: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url, credential })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        credential: SecretString,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url, credential })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let full = format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        );
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.authorized(self.http.get(url)).send().await?;
        self.parse_envelope(resp).await
    }

    /// Send a GET request with query parameters and unwrap the envelope.
    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self
            .authorized(self.http.get(url).query(query))
            .send()
            .await?;
        self.parse_envelope(resp).await
    }

    /// Send a GET request against a paginated endpoint.
    pub(crate) async fn get_paged<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Page<T>, Error> {
        debug!("GET {}", url);
        let resp = self
            .authorized(self.http.get(url).query(query))
            .send()
            .await?;
        self.parse_paginated(resp).await
    }

    /// Send a POST request with JSON body and unwrap the envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .authorized(self.http.post(url).json(body))
            .send()
            .await?;
        self.parse_envelope(resp).await
    }

    /// Send a PATCH request with JSON body and unwrap the envelope.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);
        let resp = self
            .authorized(self.http.patch(url).json(body))
            .send()
            .await?;
        self.parse_envelope(resp).await
    }

    /// Send a bodyless PATCH (flag toggles like mark-read), discarding
    /// the payload.
    pub(crate) async fn patch_empty(&self, url: Url) -> Result<(), Error> {
        debug!("PATCH {}", url);
        let resp = self.authorized(self.http.patch(url)).send().await?;
        let _: serde_json::Value = self.parse_envelope(resp).await?;
        Ok(())
    }

    /// Send a DELETE request, discarding the payload.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.authorized(self.http.delete(url)).send().await?;
        let _: serde_json::Value = self.parse_envelope(resp).await?;
        Ok(())
    }

    /// Attach the bearer credential to a request.
    fn authorized(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        rb.bearer_auth(self.credential.expose_secret())
    }

    // ── Envelope parsing ─────────────────────────────────────────────

    /// Parse the `{ data, success, message? }` envelope, returning `data`
    /// on success. A 401 maps to [`Error::AuthExpired`]; `success: false`
    /// maps to [`Error::Api`] carrying the server message.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::AuthExpired);
        }

        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                message: server_message(&body)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                status: Some(status.as_u16()),
            });
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if envelope.success {
            Ok(envelope.data)
        } else {
            Err(Error::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| "request rejected".into()),
                status: Some(status.as_u16()),
            })
        }
    }

    /// Parse a paginated envelope into a [`Page`].
    async fn parse_paginated<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Page<T>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::AuthExpired);
        }

        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                message: server_message(&body)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                status: Some(status.as_u16()),
            });
        }

        let envelope: PaginatedResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if envelope.success {
            Ok(Page {
                items: envelope.data,
                pagination: envelope.pagination,
            })
        } else {
            Err(Error::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| "request rejected".into()),
                status: Some(status.as_u16()),
            })
        }
    }
}

/// Best-effort extraction of a server-side `message` from an error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["message"].as_str().map(String::from)
}
