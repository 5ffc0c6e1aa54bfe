// API server configuration loaded from environment variables.
// Decision: Without DATABASE_URL the server runs on the seeded in-memory store
// Decision: CORS stays off unless origins are listed explicitly

use axum::http::HeaderValue;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9000";

pub const DEFAULT_LOG_FILTER: &str = "courselib_api=debug,tower_http=debug";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// PostgreSQL connection string; `None` selects the in-memory backend
    pub database_url: Option<String>,
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Optional prefix nested in front of every API route (e.g. "/v2")
    pub api_prefix: String,
    /// Origins allowed for cross-origin requests
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            api_prefix: String::new(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a variable if set
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let listen_addr = lookup("LISTEN_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        // Example: API_PREFIX="/v2" results in routes like /v2/api/authors
        let api_prefix = lookup("API_PREFIX")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            database_url,
            listen_addr,
            api_prefix,
            cors_origins,
        }
    }
}
