// HTTP client for the membership backend
//
// Wraps `reqwest::Client` with base-URL handling, bearer-token injection
// from the shared `AuthContext`, and uniform response/error decoding.
// Endpoint groups (session, plans, members) are inherent methods in
// separate files so this module stays focused on transport mechanics.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthContext;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Default backend location used when no profile says otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Backends report failures as `{"message": ...}` or `{"error": ...}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Async client for the membership backend REST API.
///
/// Every authenticated call reads the bearer token from the shared
/// [`AuthContext`]; a `401` response clears that context before the
/// error is returned.
pub struct GymClient {
    http: reqwest::Client,
    base_url: Url,
    auth: Arc<AuthContext>,
}

impl GymClient {
    /// Build a client from a base URL and transport settings.
    ///
    /// The base URL is the API root, e.g. `http://localhost:8080/api`.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        auth: Arc<AuthContext>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, auth)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        auth: Arc<AuthContext>,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shared authentication context.
    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"members/7/renew"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        Ok(builder.header(AUTHORIZATION, self.auth.bearer_header()?))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.authed(self.http.get(url))?.send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authed(self.http.post(url).json(body))?.send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.authed(self.http.put(url).json(body))?.send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authed(self.http.delete(url))?.send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn post_multipart_text(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (multipart)");

        let resp = self.authed(self.http.post(url).multipart(form))?.send().await?;
        self.handle_text(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_text(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.text().await?)
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            if self.auth.clear() {
                warn!("backend rejected the session token; cleared it");
            }
            return Error::SessionExpired;
        }

        let raw = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            message: error_message(status, &raw),
        }
    }
}

/// Best-effort human message from an error body.
pub(crate) fn error_message(status: reqwest::StatusCode, raw: &str) -> String {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(raw) {
        if let Some(msg) = body.message.or(body.error) {
            return msg;
        }
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| status.to_string(), str::to_owned)
    } else {
        trimmed.to_owned()
    }
}
