//! Resolved server configuration.

use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use crate::inbound::api::StudentsApi;

/// Everything [`create_server`](super::create_server) needs to listen.
pub struct ServerConfig {
    pub(crate) api: StudentsApi,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) api_prefix: String,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Configuration serving `api` under `/api` on `bind_addr`.
    #[must_use]
    pub fn new(api: StudentsApi, bind_addr: SocketAddr) -> Self {
        Self {
            api,
            bind_addr,
            api_prefix: "/api".to_owned(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Mount the routes under `prefix` instead.
    #[must_use]
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Route prefix.
    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// Attach Prometheus middleware.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
