use std::time::Duration;

/// Per-request timeout for every call to the Nexus REST API.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct NexusConfig {
    pub host: String,
    pub port: u16,
    /// Context path Nexus is served under, e.g. "/nexus". Empty for the root.
    pub path: String,
    pub username: String,
    pub timeout: Duration,
}

impl NexusConfig {
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Root of the REST API, e.g. `http://localhost:80/nexus/service/rest`.
    #[must_use]
    pub fn api_root(&self) -> String {
        let path = self.path.trim().trim_matches('/');
        if path.is_empty() {
            format!("http://{}:{}/service/rest", self.host, self.port)
        } else {
            format!("http://{}:{}/{}/service/rest", self.host, self.port, path)
        }
    }
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 80,
            path: String::new(),
            username: "admin".to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}
