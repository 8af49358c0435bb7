use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_optional_env};
use service_core::error::AppError;

pub const SERVICE_NAME: &str = "person-service";

#[derive(Debug, Clone)]
pub struct PersonConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string; may embed credentials.
    pub uri: Secret<String>,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl PersonConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        let is_prod = common.is_prod();

        Ok(PersonConfig {
            mongodb: MongoConfig {
                uri: Secret::new(get_env("MONGODB_URL", None, is_prod)?),
                database: get_env("MONGODB_DATABASE", Some("people"), is_prod)?,
                collection: get_env("MONGODB_COLLECTION", Some("group"), is_prod)?,
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            },
            common,
        })
    }
}
