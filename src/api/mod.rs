//! The shared HTTP pipeline every console call goes through. One client holds
//! the base endpoint, the request timeout and the interception points, so no
//! call site attaches credentials or handles an expired session on its own.
//!
//! Flow Overview:
//! - `prepare` reads the token store right before dispatch and attaches the
//!   bearer header when a token exists.
//! - The request is sent with the configured timeout.
//! - `handle` unwraps the transport response into the JSON body; on `401` it
//!   runs the sign-out recovery once and still rejects so the caller can react.
//!
//! Nothing is retried here.

mod error;
pub mod interceptors;

pub use error::ApiError;

use crate::{
    config::AppConfig, navigation::Navigator, session::TokenStore, APP_USER_AGENT,
};
use reqwest::{header::CONTENT_TYPE, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, info_span, warn, Instrument};

/// The API's business envelope: `{ "message": "OK", "data": ... }`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Cheap to clone; clones share the connection pool, token store and navigator.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// # Errors
    /// Returns `ApiError::Config` if the underlying HTTP client cannot be built.
    pub fn new(
        config: &AppConfig,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                base_url: config.api_base_url.clone(),
                timeout: config.timeout,
                tokens,
                navigator,
            }),
        })
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Builds a URL from the configured base URL and the provided path.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        build_url_with_base(&self.inner.base_url, path)
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::DELETE, path, None).await
    }

    /// Runs one request through the pipeline and decodes the body into `T`.
    ///
    /// # Errors
    /// `Serialization` if the body cannot be encoded, `Timeout`/`Network` when
    /// no response arrives, `Unauthorized` after sign-out recovery on 401,
    /// `Http` for other non-2xx statuses and `Parse` if the body does not fit `T`.
    pub async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path);
        let mut builder = self.inner.client.request(method.clone(), &url);

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|err| ApiError::Serialization(format!("Failed to encode request: {err}")))?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let span = info_span!(
            "api.request",
            http.method = %method,
            url = %url
        );
        let outcome = self.prepare(builder).send().instrument(span).await;
        let payload = self.handle(outcome).await?;

        serde_json::from_value(payload)
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    }

    /// Outbound interception: reads the token store fresh for this request.
    #[must_use]
    pub fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        interceptors::attach_credentials(builder, self.inner.tokens.get().as_ref())
    }

    /// Inbound interception: unwraps a response into its body, or rejects.
    ///
    /// # Errors
    /// Same as [`interceptors::classify`], plus transport failures.
    pub async fn handle(&self, outcome: Result<Response, reqwest::Error>) -> Result<Value, ApiError> {
        let response = outcome.map_err(|err| interceptors::map_transport_error(&err))?;
        let status = response.status();
        let body = response.bytes().await;

        debug!("response status: {}", status);

        // the status alone decides a 401; a body lost in transit must not skip recovery
        if status == StatusCode::UNAUTHORIZED {
            if let Err(err) = &body {
                warn!("failed to read 401 response body: {err}");
            }
            interceptors::recover_from_auth_failure(
                &self.inner.tokens,
                self.inner.navigator.as_ref(),
            );
            return interceptors::classify(status, body.as_deref().unwrap_or_default());
        }

        let body = body.map_err(|err| interceptors::map_transport_error(&err))?;
        interceptors::classify(status, &body)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::History;
    use secrecy::SecretString;

    fn client(tokens: TokenStore) -> Result<ApiClient, ApiError> {
        let config = AppConfig::new(Some("http://api.newsdesk.test/v1_0/"), 5_000, None)?;
        ApiClient::new(&config, tokens, Arc::new(History::default()))
    }

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("http://api.test/v1_0/", "/user/profile"),
            "http://api.test/v1_0/user/profile"
        );
        assert_eq!(
            build_url_with_base("http://api.test", "channels"),
            "http://api.test/channels"
        );
        assert_eq!(build_url_with_base("  ", "/channels"), "/channels");
    }

    #[test]
    fn prepare_reads_the_store_on_every_call() -> Result<(), ApiError> {
        let tokens = TokenStore::in_memory();
        let api = client(tokens.clone())?;
        let url = api.endpoint_url("/user/profile");
        assert_eq!(url, "http://api.newsdesk.test/v1_0/user/profile");

        let header = |api: &ApiClient| {
            api.prepare(reqwest::Client::new().get(&url))
                .build()
                .ok()
                .and_then(|request| {
                    request
                        .headers()
                        .get(reqwest::header::AUTHORIZATION)
                        .and_then(|value| value.to_str().ok())
                        .map(ToString::to_string)
                })
        };

        assert_eq!(header(&api), None);
        tokens.set(&SecretString::from("abc123"))?;
        assert_eq!(header(&api), Some("Bearer abc123".to_string()));
        tokens.remove()?;
        assert_eq!(header(&api), None);
        Ok(())
    }

    #[test]
    fn envelope_tolerates_missing_message() {
        let envelope: Result<Envelope<Vec<u32>>, _> = serde_json::from_str(r#"{"data":[1,2]}"#);
        assert_eq!(
            envelope.map(Envelope::into_data).ok(),
            Some(vec![1, 2])
        );
    }
}
