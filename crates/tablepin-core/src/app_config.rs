use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Postgres DSN for the user-directory service. Optional so that
    /// client-only commands can run without a database configured; the
    /// server fails startup when it is absent.
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the remote pin store, for client-side commands.
    pub store_url: Option<String>,
    pub http_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// The Postgres DSN, or [`ConfigError::MissingEnvVar`] when the service
    /// is started without one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar("DATABASE_URL")` if unset.
    pub fn require_database_url(&self) -> Result<&str, crate::ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }

    /// The remote pin store base URL, required by client-side commands.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar("TABLEPIN_STORE_URL")` if unset.
    pub fn require_store_url(&self) -> Result<&str, crate::ConfigError> {
        self.store_url
            .as_deref()
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("TABLEPIN_STORE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("store_url", &self.store_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
