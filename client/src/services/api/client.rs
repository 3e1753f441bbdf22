//! # API Client
//!
//! The single choke point for every call to the expense API.
//!
//! [`ApiClient::request`] builds the request, sends it through an
//! [`HttpBackend`], and classifies the answer:
//!
//! - 204 or an empty body is a `null` payload
//! - a body that is not JSON is kept as text
//! - 2xx decodes into the caller's type
//! - 401 is [`ClientError::Unauthorized`] and signs the session out before
//!   returning, unless the request opted out
//! - any other status is [`ClientError::RequestFailed`] with the best message
//!   the body offers

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;

use super::payload::Payload;
use crate::app::session::Session;
use crate::config::ClientConfig;
use crate::core::error::{ClientError, Result};
use crate::core::service::{HttpBackend, HttpRequest, HttpResponse};
use crate::utils::constants::{SESSION_EXPIRED, UNAUTHORIZED_FALLBACK, UNEXPECTED_ERROR};

/// `reqwest` transport with a cookie jar, so the session cookie set by
/// `/auth/login` rides along on every later request.
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::network(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Query parameters, appended in order
    pub query: Vec<(String, String)>,
    /// Treat a 401 as an ordinary error instead of an expired session.
    /// Used by the auth endpoints, where a 401 means wrong credentials.
    pub skip_auth_on_401: bool,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Decode(format!("Failed to encode request: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn skip_auth_on_401(mut self) -> Self {
        self.skip_auth_on_401 = true;
        self
    }
}

/// HTTP client for the expense API.
///
/// Cheap to share behind an `Arc`; all state lives in the backend's cookie
/// jar and in the [`Session`].
pub struct ApiClient {
    backend: Arc<dyn HttpBackend>,
    session: Arc<Session>,
    base_url: String,
}

impl ApiClient {
    /// Client over the real network
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Result<Self> {
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::with_backend(Arc::new(backend), config.base_url(), session))
    }

    /// Client over any backend; `base_url` already includes the API prefix
    pub fn with_backend(
        backend: Arc<dyn HttpBackend>,
        base_url: impl Into<String>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            backend,
            session,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and decode a successful payload into `T`
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let response = self.execute(path, options).await?;
        Payload::parse(response.status, &response.body).decode()
    }

    /// Send a request and return the raw body of a successful answer
    pub async fn request_bytes(&self, path: &str, options: RequestOptions) -> Result<Vec<u8>> {
        let response = self.execute(path, options).await?;
        Ok(response.body)
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::network(format!("Invalid URL for {}: {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    async fn execute(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        let url = self.endpoint(path, &options.query)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if options.body.is_some() || options.method != Method::GET {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let body = options.body.as_ref().map(Value::to_string);
        let request = HttpRequest {
            method: options.method.clone(),
            url,
            headers,
            body,
        };

        let span = tracing::info_span!(
            "api_request",
            request_id = %uuid::Uuid::new_v4(),
            method = %options.method,
            path = %path,
        );

        async move {
            let epoch = self.session.epoch();
            let start = Instant::now();
            let response = self.backend.send(request).await.map_err(|e| {
                tracing::error!(error = %e, "Request failed before a response");
                e
            })?;

            let duration_ms = start.elapsed().as_millis() as u64;
            tracing::debug!(status = response.status.as_u16(), duration_ms, "Response received");

            self.classify(&response, epoch, options.skip_auth_on_401)?;
            Ok(response)
        }
        .instrument(span)
        .await
    }

    /// Map a response to `Ok` or the matching error. `epoch` is the session
    /// epoch the request was sent under.
    fn classify(&self, response: &HttpResponse, epoch: u64, skip_auth_on_401: bool) -> Result<()> {
        let status = response.status;
        if status.is_success() {
            return Ok(());
        }

        let payload = Payload::parse(status, &response.body);

        if status == StatusCode::UNAUTHORIZED {
            let message = payload
                .server_message()
                .unwrap_or_else(|| UNAUTHORIZED_FALLBACK.to_string());
            tracing::warn!(message = %message, skip_auth_on_401, "Unauthorized");
            if !skip_auth_on_401 {
                self.session.expire(epoch, Some(SESSION_EXPIRED));
            }
            return Err(ClientError::Unauthorized { message });
        }

        let message = payload
            .server_message()
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| UNEXPECTED_ERROR.to_string());
        tracing::warn!(status = status.as_u16(), message = %message, "Request rejected");

        Err(ClientError::RequestFailed {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{AuthPrompt, SessionStatus};
    use crate::core::testing::{MockBackend, MockReply, TEST_BASE};
    use serde_json::json;
    use shared::UserInfo;
    use std::collections::HashMap;
    use tokio::sync::Notify;

    fn user(id: i64) -> UserInfo {
        UserInfo {
            id,
            username: "ana".to_string(),
            created_at: None,
        }
    }

    fn client(backend: &Arc<MockBackend>) -> ApiClient {
        let (tx, _rx) = async_channel::unbounded();
        let session = Arc::new(Session::new(tx));
        let epoch = session.begin_authentication();
        session.authenticate(epoch, user(1));
        ApiClient::with_backend(backend.clone(), TEST_BASE, session)
    }

    #[tokio::test]
    async fn test_no_content_is_null() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::DELETE, "/cards/3", MockReply::empty(204));
        let api = client(&backend);

        let value: Value = api.request("/cards/3", RequestOptions::delete()).await.unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_get_has_no_content_type() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::GET, "/balance", MockReply::json(200, json!({"net_balance": 10.0})));
        backend.on(Method::PUT, "/balance", MockReply::json(200, json!({"net_balance": 12.5})));
        let api = client(&backend);

        let _: Value = api.request("/balance", RequestOptions::get()).await.unwrap();
        let put = RequestOptions::put().json(&json!({"net_balance": 12.5})).unwrap();
        let _: Value = api.request("/balance", put).await.unwrap();

        let requests = backend.requests();
        assert!(requests[0].headers.get(CONTENT_TYPE).is_none());
        assert!(requests[0].body.is_none());
        assert_eq!(
            requests[1].headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(requests[1].body.as_deref(), Some(r#"{"net_balance":12.5}"#));
    }

    #[tokio::test]
    async fn test_error_message_priority() {
        let backend = Arc::new(MockBackend::new());
        backend.on(
            Method::GET,
            "/cards/9",
            MockReply::json(404, json!({"detail": "Card não encontrado", "message": "x"})),
        );
        backend.on(Method::GET, "/cards/8", MockReply::json(400, json!({"message": "Falhou"})));
        backend.on(Method::GET, "/cards/7", MockReply::text(502, "Bad Gateway from proxy"));
        backend.on(Method::GET, "/cards/6", MockReply::empty(503));
        backend.on(Method::GET, "/cards/5", MockReply::empty(599));
        let api = client(&backend);

        async fn failure(api: &ApiClient, path: &str) -> ClientError {
            api.request::<Value>(path, RequestOptions::get())
                .await
                .unwrap_err()
        }

        assert_eq!(
            failure(&api, "/cards/9").await,
            ClientError::RequestFailed {
                status: 404,
                message: "Card não encontrado".to_string()
            }
        );
        assert_eq!(failure(&api, "/cards/8").await.message(), "Falhou");
        assert_eq!(failure(&api, "/cards/7").await.message(), "Bad Gateway from proxy");
        assert_eq!(failure(&api, "/cards/6").await.message(), "Service Unavailable");
        assert_eq!(failure(&api, "/cards/5").await.message(), UNEXPECTED_ERROR);
    }

    #[tokio::test]
    async fn test_unauthorized_signs_out_before_returning() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::GET, "/cards", MockReply::json(401, json!({"detail": "Não autenticado"})));
        let api = client(&backend);

        let err = api.request::<Value>("/cards", RequestOptions::get()).await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Unauthorized {
                message: "Não autenticado".to_string()
            }
        );
        assert_eq!(api.session().status(), SessionStatus::Anonymous);
        assert_eq!(
            api.session().prompt(),
            Some(AuthPrompt::login(Some(SESSION_EXPIRED.to_string())))
        );
    }

    #[tokio::test]
    async fn test_unauthorized_from_previous_session_is_ignored() {
        let backend = Arc::new(MockBackend::new());
        let release = Arc::new(Notify::new());
        backend.on(
            Method::GET,
            "/cards",
            MockReply::json(401, json!({"detail": "Não autenticado"})).held(release.clone()),
        );
        let api = client(&backend);

        let pending = api.request::<Value>("/cards", RequestOptions::get());
        let sign_in_again = async {
            backend.wait_for_requests(1).await;
            let session = api.session();
            session.force_sign_out(None);
            let epoch = session.begin_authentication();
            session.authenticate(epoch, user(2));
            release.notify_one();
        };
        let (result, ()) = tokio::join!(pending, sign_in_again);

        assert!(result.unwrap_err().is_unauthorized());
        assert_eq!(api.session().status(), SessionStatus::Authenticated);
        assert_eq!(api.session().user(), Some(user(2)));
        assert_eq!(api.session().prompt(), None);
    }

    #[test]
    fn test_body_encoding_failure() {
        let mut body = HashMap::new();
        body.insert((1, 2), "x");

        let err = RequestOptions::post().json(&body).unwrap_err();

        assert!(err.message().starts_with("Failed to encode request"));
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_skip_auth_on_401() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::POST, "/auth/login", MockReply::empty(401));
        let api = client(&backend);

        let options = RequestOptions::post().skip_auth_on_401();
        let err = api.request::<Value>("/auth/login", options).await.unwrap_err();

        assert_eq!(err.message(), UNAUTHORIZED_FALLBACK);
        assert_eq!(api.session().status(), SessionStatus::Authenticated);
        assert_eq!(api.session().prompt(), None);
    }

    #[tokio::test]
    async fn test_network_and_decode_errors() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::GET, "/balance", MockReply::network("connection refused"));
        backend.on(Method::GET, "/cards/summary", MockReply::text(200, "not json"));
        let api = client(&backend);

        let err = api
            .request::<shared::Balance>("/balance", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(err.is_network());

        let err = api
            .request::<shared::Summary>("/cards/summary", RequestOptions::get())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_query_only_when_present() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::GET, "/cards", MockReply::json(200, json!([])));
        backend.on(Method::GET, "/cards", MockReply::json(200, json!([])));
        let api = client(&backend);

        let _: Value = api.request("/cards", RequestOptions::get()).await.unwrap();
        let filtered = RequestOptions::get().query(vec![("status".to_string(), "pendente".to_string())]);
        let _: Value = api.request("/cards", filtered).await.unwrap();

        assert_eq!(backend.calls(), vec!["GET /cards", "GET /cards?status=pendente"]);
    }

    #[tokio::test]
    async fn test_request_bytes() {
        let backend = Arc::new(MockBackend::new());
        backend.on(
            Method::GET,
            "/export/spreadsheet",
            MockReply::bytes(200, vec![0x50, 0x4b, 0x03, 0x04]),
        );
        let api = client(&backend);

        let bytes = api
            .request_bytes("/export/spreadsheet", RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }
}
