use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP server, session and storage settings.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Cookie signing secret shared with the auth service. At least 32 bytes.
    pub secret: String,
    /// Cookie domain shared with the auth service.
    pub domain: String,
    /// Where unauthenticated users are sent to sign in.
    pub auth_service_url: String,
    pub database_url: String,
    pub templates_dir: String,
    /// Filesystem root of the local object store.
    pub upload_dir: String,
    /// Public URL prefix the object store is served under.
    pub upload_url: String,
}

/// Text-generation API settings.
#[derive(Clone, Debug, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Complete application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Layers `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
    /// and `APP__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
