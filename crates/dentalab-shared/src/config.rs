//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_PORT, DEFAULT_TOKEN_LEEWAY_SECS};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Where the caller's laboratory identifier comes from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TenantSource {
    /// Signed `laboratory_id` claim of a bearer JWT.
    Token,
    /// Unauthenticated `laboratory_id` query parameter.
    Query,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub tenant_source: TenantSource,
    #[serde(default)]
    pub jwt_secret: String,
    pub leeway_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", DEFAULT_PORT as i64)?
            .set_default("app.name", "dentalab-server")?
            .set_default("auth.tenant_source", "token")?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.leeway_secs", DEFAULT_TOKEN_LEEWAY_SECS as i64)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects combinations the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.tenant_source == TenantSource::Token && self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "auth.jwt_secret is required when auth.tenant_source = \"token\"".to_string(),
            ));
        }
        Ok(())
    }
}
