//! HTTP client core.
//!
//! Single point of dispatch to `{origin}/api`:
//! - attaches `Authorization: Bearer <token>` when the session holds a token
//! - on 401 evicts the session and, from gated locations, redirects to login
//! - surfaces every failure to the caller (no retry, no backoff, no timeout)

pub mod error;
pub mod navigation;

pub use error::ApiError;
pub use navigation::{MemoryNavigator, Navigator, RoutePolicy};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::session::Session;

/// Path prefix of the backend REST surface
const API_PREFIX: &str = "/api";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
    navigator: Arc<dyn Navigator>,
    routes: RoutePolicy,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("routes", &self.routes)
            .finish()
    }
}

impl ApiClient {
    /// Build a client for the backend at `origin` (e.g. `https://api.masjid.example`).
    pub fn new(
        origin: &str,
        session: Session,
        navigator: Arc<dyn Navigator>,
        routes: RoutePolicy,
    ) -> Result<Self, ApiError> {
        let origin = Url::parse(origin)?;
        let base_url = format!("{}{}", origin.as_str().trim_end_matches('/'), API_PREFIX);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url,
            session,
            navigator,
            routes,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path);
        self.execute(request).await
    }

    /// `GET` with query parameters; `None` fields of `query` are omitted.
    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).query(query);
        self.execute(request).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).json(body);
        self.execute(request).await
    }

    /// `POST` without a body, for action endpoints such as a sync trigger.
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path);
        self.execute(request).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.execute(request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::DELETE, path);
        self.execute(request).await
    }

    /// Multipart upload. The form's own content type replaces the JSON default.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path).multipart(form);
        self.execute(request).await
    }

    // =========================================================================
    // Interception
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "API request");
        self.authorize(self.http.request(method, self.url(path)))
    }

    /// Outbound: attach the bearer token if one is stored.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.dispatch(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        // Some endpoints (delete) answer with an empty body
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|source| ApiError::Decode { status, source })
    }

    /// Inbound: pass successes through, turn everything else into an error.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status.as_u16(), &body);
        debug!(status = status.as_u16(), detail = ?error.detail(), "API error response");

        if error.is_unauthorized() {
            self.handle_unauthorized();
        }
        Err(error)
    }

    /// Evict the credential once per 401 and leave gated locations for the
    /// login page. The error itself still goes back to the caller.
    fn handle_unauthorized(&self) {
        warn!("Backend rejected credentials (401), clearing session");
        self.session.evict();

        let current = self.navigator.current_path();
        if self.routes.should_redirect(&current) {
            info!(from = %current, to = %self.routes.login_path, "Redirecting to login");
            self.navigator.redirect(&self.routes.login_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(origin: &str) -> Result<ApiClient, ApiError> {
        ApiClient::new(
            origin,
            Session::in_memory(),
            Arc::new(MemoryNavigator::new("/admin")),
            RoutePolicy::default(),
        )
    }

    #[test]
    fn test_base_url_appends_api_prefix() {
        let c = client("https://api.masjid.example/").unwrap();
        assert_eq!(c.base_url(), "https://api.masjid.example/api");
        assert_eq!(c.url("/agenda"), "https://api.masjid.example/api/agenda");
        assert_eq!(c.url("agenda/3"), "https://api.masjid.example/api/agenda/3");
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        assert!(matches!(client("not a url"), Err(ApiError::InvalidUrl(_))));
    }
}
