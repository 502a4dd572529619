//! HTTP transport shared by the resource clients.
//!
//! [`RestTransport`] owns the `reqwest::Client`, the service base URL and the
//! token source. [`RestRequest`] builds one exchange on top of it: it attaches
//! the bearer token, sends the request, classifies the status and decodes the
//! body as JSON, text, or not at all.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{bearer_header, TokenSource};
use crate::config::{ClientConfig, TokenEncoding};
use crate::error::{ClientError, Result};

/// Shared HTTP plumbing for one Cryostat service.
///
/// Cloning is cheap; clones share the connection pool and token source.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    token_source: Arc<dyn TokenSource>,
    token_encoding: TokenEncoding,
}

impl RestTransport {
    /// Create a transport from a validated config.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the config is invalid or the
    /// HTTP client cannot be created.
    pub fn new(config: &ClientConfig, token_source: Arc<dyn TokenSource>) -> Result<Self> {
        let base_url = config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token_source,
            token_encoding: config.token_encoding,
        })
    }

    /// Create a transport with a custom reqwest client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: Url,
        token_source: Arc<dyn TokenSource>,
        token_encoding: TokenEncoding,
    ) -> Self {
        Self {
            client,
            base_url,
            token_source,
            token_encoding,
        }
    }

    /// Get the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL below the base URL from unescaped path segments.
    ///
    /// Each segment is percent-escaped on its own, so a connect URL such as
    /// `service:jmx:rmi:///jndi/rmi://app:9091/jmxrmi` stays one segment.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::RequestConstruction` if a segment is empty, `.`
    /// or `..`, or if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        // These would be dropped or collapsed by URL normalization.
        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ClientError::RequestConstruction(format!(
                "path segment {segment:?} does not name a resource"
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::RequestConstruction(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve a URL handed out by the service, absolute or base-relative.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::RequestConstruction` if the URL is malformed.
    pub fn resolve(&self, url: &str) -> Result<Url> {
        self.base_url
            .join(url)
            .map_err(|e| ClientError::RequestConstruction(format!("invalid URL {url}: {e}")))
    }

    /// Start building a request.
    #[must_use]
    pub fn request(&self, method: Method, url: Url) -> RestRequest<'_> {
        let builder = self.client.request(method.clone(), url.clone());

        RestRequest {
            transport: self,
            method,
            url,
            accept: "*/*",
            builder,
        }
    }
}

impl fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .field("token_encoding", &self.token_encoding)
            .finish_non_exhaustive()
    }
}

/// One HTTP exchange with the service.
#[must_use = "a request does nothing until it is sent"]
pub struct RestRequest<'a> {
    transport: &'a RestTransport,
    method: Method,
    url: Url,
    accept: &'static str,
    builder: reqwest::RequestBuilder,
}

impl RestRequest<'_> {
    /// Set the `Accept` header, `*/*` by default.
    pub fn accept(mut self, value: &'static str) -> Self {
        self.accept = value;
        self
    }

    /// Send a `text/plain` body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.builder = self
            .builder
            .header(CONTENT_TYPE, "text/plain")
            .body(body.into());
        self
    }

    /// Send an `application/x-www-form-urlencoded` body.
    pub fn form<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.builder = self.builder.form(body);
        self
    }

    /// Send an `application/json` body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.builder = self.builder.json(body);
        self
    }

    /// Send the request and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Fails on missing credentials, transport errors, non-2xx statuses, or
    /// a body that does not decode into `T`.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.execute().await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send the request and return the body as text.
    ///
    /// # Errors
    ///
    /// Fails on missing credentials, transport errors or non-2xx statuses.
    pub async fn send_text(self) -> Result<String> {
        let response = self.execute().await?;
        Ok(response.text().await?)
    }

    /// Send the request and ignore the body.
    ///
    /// # Errors
    ///
    /// Fails on missing credentials, transport errors or non-2xx statuses.
    pub async fn send_discard(self) -> Result<()> {
        let response = self.execute().await?;
        // Drain so the connection can be reused; failures here don't matter.
        let _ = response.bytes().await;
        Ok(())
    }

    async fn execute(self) -> Result<reqwest::Response> {
        let Self {
            transport,
            method,
            url,
            accept,
            builder,
        } = self;

        let token = transport.token_source.token().await?;
        let mut authorization = HeaderValue::from_str(&bearer_header(&token, transport.token_encoding))
            .map_err(|e| ClientError::RequestConstruction(format!("invalid bearer token: {e}")))?;
        authorization.set_sensitive(true);

        let request = builder
            .header(ACCEPT, accept)
            .header(AUTHORIZATION, authorization)
            .build()
            .map_err(|e| ClientError::RequestConstruction(e.to_string()))?;

        let response = transport.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!(method = %method, url = %url, status = %status, "Cryostat request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            method = %method,
            url = %url,
            status = %status,
            body = %body,
            "Cryostat request failed"
        );

        Err(ClientError::RequestFailed {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde::Deserialize;
    use wiremock::matchers::{any, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::StaticTokenSource;

    struct NotInCluster;

    #[async_trait]
    impl TokenSource for NotInCluster {
        async fn token(&self) -> Result<String> {
            Err(ClientError::Configuration("not running in a cluster".to_string()))
        }
    }

    #[derive(Debug, Deserialize)]
    struct Pong {
        ok: bool,
    }

    fn transport(base_url: &str, encoding: TokenEncoding) -> RestTransport {
        let mut config = ClientConfig::with_base_url(base_url);
        config.token_encoding = encoding;
        RestTransport::new(&config, Arc::new(StaticTokenSource::new("sa-token"))).unwrap()
    }

    #[test]
    fn endpoint_escapes_each_segment() {
        let transport = transport("https://cryostat:8181", TokenEncoding::Base64);
        let url = transport
            .endpoint(&[
                "api",
                "v1",
                "targets",
                "service:jmx:rmi:///jndi/rmi://app:9091/jmxrmi",
                "recordings",
                "my rec",
            ])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://cryostat:8181/api/v1/targets/service:jmx:rmi:%2F%2F%2Fjndi%2Frmi:%2F%2Fapp:9091%2Fjmxrmi/recordings/my%20rec"
        );
    }

    #[test]
    fn endpoint_rejects_unaddressable_segments() {
        let transport = transport("https://cryostat:8181", TokenEncoding::Base64);
        for segment in ["", ".", ".."] {
            let err = transport
                .endpoint(&["api", "v1", "targets", segment, "recordings"])
                .unwrap_err();
            assert!(
                matches!(err, ClientError::RequestConstruction(_)),
                "segment {segment:?} gave {err:?}"
            );
        }

        let url = transport.endpoint(&["api", "...", "a.b"]).unwrap();
        assert_eq!(url.as_str(), "https://cryostat:8181/api/.../a.b");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let transport = transport("https://gateway.example.com/cryostat/", TokenEncoding::Base64);
        let url = transport.endpoint(&["api", "v2.2", "graphql"]).unwrap();
        assert_eq!(url.as_str(), "https://gateway.example.com/cryostat/api/v2.2/graphql");
    }

    #[test]
    fn resolve_handles_absolute_and_relative() {
        let transport = transport("https://cryostat:8181", TokenEncoding::Base64);
        assert_eq!(
            transport.resolve("https://reports:10000/report").unwrap().as_str(),
            "https://reports:10000/report"
        );
        assert_eq!(
            transport.resolve("/api/beta/reports/x").unwrap().as_str(),
            "https://cryostat:8181/api/beta/reports/x"
        );
    }

    #[tokio::test]
    async fn attaches_base64_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("Authorization", "Bearer c2EtdG9rZW4="))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server.uri(), TokenEncoding::Base64);
        let url = transport.endpoint(&["ping"]).unwrap();
        let pong: Pong = transport.request(Method::GET, url).send_json().await.unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn attaches_raw_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer sa-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server.uri(), TokenEncoding::Raw);
        let url = transport.endpoint(&["ping"]).unwrap();
        transport.request(Method::GET, url).send_discard().await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_carries_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let transport = transport(&server.uri(), TokenEncoding::Base64);
        let url = transport.endpoint(&["ping"]).unwrap();
        let err = transport.request(Method::GET, url).send_text().await.unwrap_err();

        match err {
            ClientError::RequestFailed { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn redirect_status_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let transport = transport(&server.uri(), TokenEncoding::Base64);
        let url = transport.endpoint(&["ping"]).unwrap();
        let err = transport.request(Method::GET, url).send_discard().await.unwrap_err();
        assert_eq!(err.status_code(), Some(304));
    }

    #[tokio::test]
    async fn malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let transport = transport(&server.uri(), TokenEncoding::Base64);
        let url = transport.endpoint(&["ping"]).unwrap();
        let err = transport
            .request(Method::GET, url)
            .send_json::<Pong>()
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn text_body_sets_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(header("Content-Type", "text/plain"))
            .and(body_string("STOP"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server.uri(), TokenEncoding::Base64);
        let url = transport.endpoint(&["thing"]).unwrap();
        transport
            .request(Method::PATCH, url)
            .text("STOP")
            .send_discard()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_credentials_send_nothing() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = ClientConfig::with_base_url(server.uri());
        let transport = RestTransport::new(&config, Arc::new(NotInCluster)).unwrap();
        let url = transport.endpoint(&["ping"]).unwrap();
        let err = transport.request(Method::GET, url).send_discard().await.unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Bind and release a port so nothing is listening on it.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let transport = transport(&format!("http://127.0.0.1:{port}"), TokenEncoding::Base64);
        let url = transport.endpoint(&["ping"]).unwrap();
        let err = transport.request(Method::GET, url).send_discard().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.is_retriable());
    }
}
