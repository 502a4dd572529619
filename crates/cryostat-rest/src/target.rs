//! Client for monitored targets.

use cryostat_types::Target;
use reqwest::Method;

use crate::error::Result;
use crate::transport::RestTransport;

/// Lists the targets known to the service.
#[derive(Debug, Clone)]
pub struct TargetClient {
    transport: RestTransport,
}

impl TargetClient {
    /// Create a target client on top of a shared transport.
    #[must_use]
    pub fn new(transport: RestTransport) -> Self {
        Self { transport }
    }

    /// List all targets the service has discovered.
    ///
    /// Returns an empty vector when there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a target list.
    pub async fn list(&self) -> Result<Vec<Target>> {
        let base = self.transport.base_url().to_string();

        async {
            let url = self.transport.endpoint(&["api", "v1", "targets"])?;
            self.transport
                .request(Method::GET, url)
                .send_json::<Vec<Target>>()
                .await
        }
        .await
        .map_err(|e| e.context("list targets", base))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::error::ClientError;
    use crate::test_support::{transport, CONNECT_URL};

    #[tokio::test]
    async fn list_targets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/targets"))
            .and(header("Accept", "*/*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"connectUrl": CONNECT_URL, "alias": "app"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let targets = TargetClient::new(transport(&server.uri())).list().await.unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].connect_url, CONNECT_URL);
        assert_eq!(targets[0].alias.as_deref(), Some("app"));
    }

    #[tokio::test]
    async fn empty_listing_is_empty_vec() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/targets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let targets = TargetClient::new(transport(&server.uri())).list().await.unwrap();
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_is_reported_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token rejected"))
            .mount(&server)
            .await;

        let err = TargetClient::new(transport(&server.uri()))
            .list()
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(401));
        assert!(matches!(err, ClientError::Operation { operation: "list targets", .. }));
        assert!(err.to_string().contains("token rejected"));
    }
}
