use std::collections::BTreeMap;
use std::rc::Rc;

use crate::log::{debug, warn};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    InternalServerError,
    #[error("Unauthorized Access")]
    UnauthorizedAccess,
    #[error("Forbidden Access")]
    ForbiddenAccess,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(serde_json::Error),
    #[error("Serialize error: {0}")]
    SerializeError(serde_json::Error),
    #[error("Unexpected response status code: {0}")]
    UnexpectedStatusCode(u16),
    #[error(transparent)]
    Validation(#[from] crate::errors::ValidationError),
}

pub type ApiResult<T> = Result<T, ApiError>;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiHeaders(BTreeMap<String, String>);

impl ApiHeaders {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn delete(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ApiHeaders> for gloo_net::http::Headers {
    fn from(val: ApiHeaders) -> Self {
        let headers = gloo_net::http::Headers::new();
        for (key, value) in val.iter() {
            headers.set(key, value);
        }
        headers
    }
}

/// A fully prepared outgoing request, as handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: ApiHeaders,
    pub body: Option<String>,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Moves a request over the wire. Failures here are connectivity failures, never HTTP statuses.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// Sends the user back to the login screen after the backend rejects their credentials.
pub trait LoginRedirect {
    fn redirect_to_login(&self);
}

/// [`Transport`] backed by the browser's `fetch` through `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        use gloo_net::http::RequestBuilder;

        let method = match request.method {
            HttpMethod::Get => gloo_net::http::Method::GET,
            HttpMethod::Post => gloo_net::http::Method::POST,
            HttpMethod::Put => gloo_net::http::Method::PUT,
            HttpMethod::Patch => gloo_net::http::Method::PATCH,
            HttpMethod::Delete => gloo_net::http::Method::DELETE,
        };

        let builder = RequestBuilder::new(&request.url)
            .method(method)
            .headers(request.headers.into());

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Pulls a human readable reason out of an error body (`message` or `detail`).
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .into_iter()
        .find_map(|key| value.get(key)?.as_str().map(str::to_string))
}

// Reusable response handling functions
pub fn handle_response_status(response: ApiResponse, endpoint: &str) -> ApiResult<ApiResponse> {
    match response.status {
        200..=299 => Ok(response),
        400 => Err(ApiError::BadRequest(
            error_message(&response.body).unwrap_or_else(|| format!("Bad request to {}", endpoint)),
        )),
        401 => Err(ApiError::UnauthorizedAccess),
        403 => Err(ApiError::ForbiddenAccess),
        404 => Err(ApiError::NotFound(format!("{} not found", endpoint))),
        500..=599 => Err(ApiError::InternalServerError),
        status => Err(ApiError::UnexpectedStatusCode(status)),
    }
}

fn parse_json_response<T>(response: ApiResponse) -> ApiResult<T>
where
    T: serde::de::DeserializeOwned,
{
    // Empty bodies parse as `null` so `()` and `Option<_>` responses work.
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(ApiError::ParseError)
}

// Combined function for the common pattern
fn handle_json_response<T>(response: ApiResponse, endpoint: &str) -> ApiResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let validated_response = handle_response_status(response, endpoint)?;
    parse_json_response(validated_response)
}

#[async_trait::async_trait(?Send)]
pub trait ApiClient {
    // Core request method
    async fn make_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
    ) -> ApiResult<ApiResponse>;

    async fn make_request_with_body<B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<ApiResponse>
    where
        B: serde::Serialize,
    {
        let body = serde_json::to_string(body).map_err(ApiError::SerializeError)?;
        self.make_request(method, endpoint, Some(body)).await
    }

    // HTTP method implementations
    async fn get<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.make_request(HttpMethod::Get, endpoint, None).await?;
        handle_json_response(response, endpoint)
    }

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let response = self
            .make_request_with_body(HttpMethod::Post, endpoint, body)
            .await?;
        handle_json_response(response, endpoint)
    }

    async fn post_empty<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.make_request(HttpMethod::Post, endpoint, None).await?;
        handle_json_response(response, endpoint)
    }

    async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let response = self
            .make_request_with_body(HttpMethod::Put, endpoint, body)
            .await?;
        handle_json_response(response, endpoint)
    }

    async fn patch<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let response = self
            .make_request_with_body(HttpMethod::Patch, endpoint, body)
            .await?;
        handle_json_response(response, endpoint)
    }

    async fn delete<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.make_request(HttpMethod::Delete, endpoint, None).await?;
        handle_json_response(response, endpoint)
    }
}

/// The one HTTP client every backend call goes through.
///
/// Outgoing requests carry the bearer token currently persisted by the [`SessionStore`].
/// A 401 from any endpoint tears the session down and redirects to login before the error
/// is returned to the caller.
pub struct HttpApiClient {
    root_url: String,
    headers: ApiHeaders,
    transport: Rc<dyn Transport>,
    session: Rc<SessionStore>,
    redirect: Rc<dyn LoginRedirect>,
}

impl HttpApiClient {
    pub fn new(
        root_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        session: Rc<SessionStore>,
        redirect: Rc<dyn LoginRedirect>,
    ) -> Self {
        let root_url: String = root_url.into();
        let mut headers = ApiHeaders::new();
        headers.insert(CONTENT_TYPE, "application/json");

        Self {
            root_url: root_url.trim_end_matches('/').to_string(),
            headers,
            transport,
            session,
            redirect,
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    fn authorize(&self, headers: &mut ApiHeaders) {
        match self.session.persisted_token() {
            Some(token) => headers.insert(AUTHORIZATION, token.bearer()),
            None => headers.delete(AUTHORIZATION),
        }
    }

    fn intercept(&self, response: ApiResponse, endpoint: &str) -> ApiResult<ApiResponse> {
        if response.status == 401 {
            warn!("{} rejected our credentials, signing out", endpoint);
            self.session.clear_session();
            self.redirect.redirect_to_login();
            return Err(ApiError::UnauthorizedAccess);
        }
        Ok(response)
    }
}

#[async_trait::async_trait(?Send)]
impl ApiClient for HttpApiClient {
    async fn make_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
    ) -> ApiResult<ApiResponse> {
        let mut headers = self.headers.clone();
        self.authorize(&mut headers);

        let request = ApiRequest {
            method,
            url: format!("{}{}", self.root_url, endpoint),
            headers,
            body,
        };

        debug!("{} {}", method.as_str(), request.url);
        let response = self.transport.send(request).await?;
        self.intercept(response, endpoint)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use super::*;

    /// Replays scripted responses and records every request.
    #[derive(Default)]
    pub struct ScriptedTransport {
        pub requests: RefCell<Vec<ApiRequest>>,
        responses: RefCell<VecDeque<ApiResult<ApiResponse>>>,
    }

    impl ScriptedTransport {
        pub fn respond(&self, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .push_back(Ok(ApiResponse::new(status, body)));
        }

        pub fn fail(&self, reason: &str) {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::NetworkError(reason.to_string())));
        }

        pub fn last_request(&self) -> ApiRequest {
            self.requests.borrow().last().cloned().expect("no request sent")
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(ApiResponse::new(200, "{}")))
        }
    }

    #[derive(Default)]
    pub struct CountingRedirect {
        pub count: Cell<usize>,
    }

    impl LoginRedirect for CountingRedirect {
        fn redirect_to_login(&self) {
            self.count.set(self.count.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use serde_json::{Value, json};

    use super::testing::{CountingRedirect, ScriptedTransport};
    use super::*;
    use crate::data::User;
    use crate::session::{AuthToken, Session};
    use crate::storage::{MemoryStorage, SESSION_KEY, SessionStorage};

    struct Harness {
        storage: Rc<MemoryStorage>,
        transport: Rc<ScriptedTransport>,
        redirect: Rc<CountingRedirect>,
        session: Rc<SessionStore>,
        client: HttpApiClient,
    }

    fn harness(storage: MemoryStorage) -> Harness {
        let storage = Rc::new(storage);
        let transport = Rc::new(ScriptedTransport::default());
        let redirect = Rc::new(CountingRedirect::default());
        let session = SessionStore::new(storage.clone());
        let client = HttpApiClient::new(
            "https://api.test/v1/",
            transport.clone(),
            session.clone(),
            redirect.clone(),
        );
        Harness {
            storage,
            transport,
            redirect,
            session,
            client,
        }
    }

    fn logged_in() -> Harness {
        let h = harness(MemoryStorage::new());
        h.session
            .set_session(User::new("u1", "9876543210"), AuthToken::new("abc"));
        h
    }

    #[test]
    fn test_attaches_bearer_token() {
        let h = logged_in();
        h.transport.respond(200, r#"{"ok":true}"#);

        let body: Value = block_on(h.client.get("/profile/me")).unwrap();

        assert_eq!(body, json!({ "ok": true }));
        let request = h.transport.last_request();
        assert_eq!(request.url, "https://api.test/v1/profile/me");
        assert_eq!(request.headers.get(AUTHORIZATION), Some("Bearer abc"));
        assert_eq!(request.headers.get(CONTENT_TYPE), Some("application/json"));
    }

    #[test]
    fn test_no_token_no_header() {
        let h = harness(MemoryStorage::new());
        block_on(h.client.get::<Value>("/profile/list?page=1")).unwrap();

        assert_eq!(h.transport.last_request().headers.get(AUTHORIZATION), None);
    }

    #[test]
    fn test_token_read_from_storage_at_request_time() {
        let h = logged_in();
        h.storage.remove(SESSION_KEY).unwrap();

        block_on(h.client.get::<Value>("/auth/me")).unwrap();
        assert_eq!(h.transport.last_request().headers.get(AUTHORIZATION), None);
    }

    #[test]
    fn test_malformed_storage_sends_without_token() {
        let h = harness(MemoryStorage::with_entry(SESSION_KEY, "{\"state\": oops"));
        h.transport.respond(200, r#"{"total":0}"#);

        let body: Value = block_on(h.client.get("/profile/list?page=1")).unwrap();

        assert_eq!(body["total"], json!(0));
        assert_eq!(h.transport.last_request().headers.get(AUTHORIZATION), None);
    }

    #[test]
    fn test_unauthorized_clears_session_and_redirects_once() {
        let h = logged_in();
        h.transport.respond(401, r#"{"detail":"expired"}"#);

        let result = block_on(h.client.get::<Value>("/auth/me"));

        assert!(matches!(result, Err(ApiError::UnauthorizedAccess)));
        assert_eq!(h.session.session(), Session::Anonymous);
        assert!(h.storage.raw(SESSION_KEY).is_none());
        assert_eq!(h.redirect.count.get(), 1);

        h.transport.respond(401, "");
        let result = block_on(h.client.post_empty::<Value>("/auth/logout"));
        assert!(matches!(result, Err(ApiError::UnauthorizedAccess)));
        assert_eq!(h.redirect.count.get(), 2);
    }

    /// Records what the session looked like at the moment of the redirect.
    struct SnapshotRedirect {
        session: Rc<SessionStore>,
        storage: Rc<MemoryStorage>,
        seen: RefCell<Vec<(Session, Option<String>)>>,
    }

    impl LoginRedirect for SnapshotRedirect {
        fn redirect_to_login(&self) {
            self.seen
                .borrow_mut()
                .push((self.session.session(), self.storage.raw(SESSION_KEY)));
        }
    }

    #[test]
    fn test_session_is_cleared_before_redirect() {
        let storage = Rc::new(MemoryStorage::new());
        let transport = Rc::new(ScriptedTransport::default());
        let session = SessionStore::new(storage.clone());
        session.set_session(User::new("u1", "9876543210"), AuthToken::new("abc"));
        let redirect = Rc::new(SnapshotRedirect {
            session: session.clone(),
            storage: storage.clone(),
            seen: RefCell::new(Vec::new()),
        });
        let client = HttpApiClient::new(
            "https://api.test/v1",
            transport.clone(),
            session.clone(),
            redirect.clone(),
        );
        assert!(storage.raw(SESSION_KEY).is_some());

        transport.respond(401, "");
        let result = block_on(client.get::<Value>("/profile/me"));

        assert!(matches!(result, Err(ApiError::UnauthorizedAccess)));
        assert_eq!(*redirect.seen.borrow(), vec![(Session::Anonymous, None)]);
    }

    #[test]
    fn test_other_errors_pass_through() {
        let h = logged_in();
        h.transport.respond(400, r#"{"message":"Invalid OTP"}"#);
        h.transport.respond(403, "");
        h.transport.respond(404, "");
        h.transport.respond(503, "");
        h.transport.respond(418, "");

        let bad = block_on(h.client.post::<Value, _>("/auth/phone/verify-otp", &json!({})));
        assert!(matches!(bad, Err(ApiError::BadRequest(ref msg)) if msg == "Invalid OTP"));
        assert!(matches!(
            block_on(h.client.get::<Value>("/x")),
            Err(ApiError::ForbiddenAccess)
        ));
        assert!(matches!(
            block_on(h.client.get::<Value>("/x")),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            block_on(h.client.get::<Value>("/x")),
            Err(ApiError::InternalServerError)
        ));
        assert!(matches!(
            block_on(h.client.delete::<Value>("/x")),
            Err(ApiError::UnexpectedStatusCode(418))
        ));

        assert!(h.session.is_authenticated());
        assert_eq!(h.redirect.count.get(), 0);
    }

    #[test]
    fn test_network_failure_propagates() {
        let h = logged_in();
        h.transport.fail("connection refused");

        let result = block_on(h.client.get::<Value>("/auth/me"));

        assert!(matches!(result, Err(ApiError::NetworkError(ref reason)) if reason == "connection refused"));
        assert!(h.session.is_authenticated());
        assert_eq!(h.redirect.count.get(), 0);
    }

    #[test]
    fn test_body_is_serialized_json() {
        let h = logged_in();
        h.transport.respond(200, "");

        block_on(h.client.patch::<(), _>("/profile/create", &json!({ "name": "Asha" }))).unwrap();

        let request = h.transport.last_request();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Asha"}"#));
    }

    #[test]
    fn test_parse_error_on_unexpected_shape() {
        let h = logged_in();
        h.transport.respond(200, "[1, 2, 3]");

        let result = block_on(h.client.get::<User>("/auth/me"));
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }
}
