//! Helpers shared by the unit tests.

use std::sync::Arc;

use crate::auth::StaticTokenSource;
use crate::config::ClientConfig;
use crate::transport::RestTransport;

pub(crate) const CONNECT_URL: &str = "service:jmx:rmi:///jndi/rmi://app:9091/jmxrmi";
pub(crate) const ESCAPED_CONNECT_URL: &str = "service:jmx:rmi:%2F%2F%2Fjndi%2Frmi:%2F%2Fapp:9091%2Fjmxrmi";

pub(crate) fn transport(base_url: &str) -> RestTransport {
    let config = ClientConfig::with_base_url(base_url);
    RestTransport::new(&config, Arc::new(StaticTokenSource::new("sa-token")))
        .expect("test transport")
}
