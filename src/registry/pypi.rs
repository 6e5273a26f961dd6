//! PyPI JSON API adapter
//!
//! Fetches the latest released version of a package from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;

/// PyPI API base URL
pub const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI adapter
pub struct PyPIAdapter {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPIResponse {
    info: Option<PyPIInfo>,
}

/// The `info` object of a package response
#[derive(Debug, Deserialize)]
struct PyPIInfo {
    /// Latest non-yanked release
    version: Option<String>,
}

impl PyPIAdapter {
    /// Create a new PyPI adapter against pypi.org
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, PYPI_API_URL)
    }

    /// Create an adapter against another index serving the same JSON API
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl RegistryAdapter for PyPIAdapter {
    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn fetch_latest(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: PyPIResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        response
            .info
            .and_then(|info| info.version)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RegistryError::missing_version(package, self.registry_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter_for(server: &MockServer) -> PyPIAdapter {
        let client = HttpClient::new().unwrap().with_max_retries(0);
        PyPIAdapter::with_base_url(client, server.uri())
    }

    #[test]
    fn test_pypi_adapter_registry_name() {
        let adapter = PyPIAdapter::new(HttpClient::new().unwrap());
        assert_eq!(adapter.registry_name(), "PyPI");
    }

    #[test]
    fn test_build_url() {
        let adapter = PyPIAdapter::new(HttpClient::new().unwrap());
        assert_eq!(
            adapter.build_url("requests"),
            "https://pypi.org/pypi/requests/json"
        );
    }

    #[test]
    fn test_build_url_custom_base_trailing_slash() {
        let adapter =
            PyPIAdapter::with_base_url(HttpClient::new().unwrap(), "http://localhost:8080/pypi/");
        assert_eq!(
            adapter.build_url("flask-restful"),
            "http://localhost:8080/pypi/flask-restful/json"
        );
    }

    #[tokio::test]
    async fn test_fetch_latest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flask/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "info": { "name": "Flask", "version": "3.0.3" },
                "releases": {}
            })))
            .mount(&server)
            .await;

        let latest = adapter_for(&server).fetch_latest("flask").await.unwrap();
        assert_eq!(latest, "3.0.3");
    }

    #[tokio::test]
    async fn test_fetch_latest_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = adapter_for(&server).fetch_latest("nope").await.unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_latest_missing_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "info": {} })))
            .mount(&server)
            .await;

        let err = adapter_for(&server).fetch_latest("flask").await.unwrap_err();
        assert!(matches!(err, RegistryError::MissingVersion { .. }));
    }

    #[tokio::test]
    async fn test_fetch_latest_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = adapter_for(&server).fetch_latest("flask").await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_latest_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "info": { "version": "1.1" } })),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap().with_max_retries(1);
        let adapter = PyPIAdapter::with_base_url(client, server.uri());
        assert_eq!(adapter.fetch_latest("pkg").await.unwrap(), "1.1");
    }

    #[tokio::test]
    async fn test_fetch_latest_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "info": { "version": "9.9" } }))
                    .set_delay(std::time::Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(std::time::Duration::from_millis(200)).unwrap();
        let adapter = PyPIAdapter::with_base_url(client, server.uri());
        let err = adapter.fetch_latest("slow").await.unwrap_err();
        assert!(matches!(err, RegistryError::Timeout { .. }));
    }
}
