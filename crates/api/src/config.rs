use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Session token signing
    pub jwt: JwtAuthConfig,
    /// First superadmin, created on startup when no admin exists
    #[serde(default)]
    pub admin: AdminBootstrapConfig,
    /// Object storage for gallery images
    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connect_timeout_secs: config.connect_timeout_secs,
            idle_timeout_secs: config.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// RSVP and wish submissions per client per minute (0 disables)
    #[serde(default = "default_submission_rate_limit")]
    pub submission_rate_limit_per_minute: u32,

    /// Login attempts per client per minute (0 disables)
    #[serde(default = "default_login_rate_limit")]
    pub login_rate_limit_per_minute: u32,

    #[serde(default)]
    pub hsts_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtAuthConfig {
    /// HMAC secret, at least 32 bytes
    pub secret: String,

    /// Token lifetime in seconds (default: 604800 = 7 days)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,

    /// Leeway in seconds for clock skew tolerance
    #[serde(default = "default_jwt_leeway")]
    pub leeway_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminBootstrapConfig {
    #[serde(default)]
    pub bootstrap_username: String,

    #[serde(default)]
    pub bootstrap_password: String,
}

/// Cloudinary credentials for signed uploads and deletes.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub cloud_name: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_secret: String,

    /// Root folder; each wedding uploads into `<folder>/<slug>`
    #[serde(default = "default_upload_folder")]
    pub upload_folder: String,

    #[serde(default = "default_media_api_base")]
    pub api_base_url: String,

    #[serde(default = "default_media_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            upload_folder: default_upload_folder(),
            api_base_url: default_media_api_base(),
            timeout_ms: default_media_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_body_size() -> usize {
    1_048_576
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_submission_rate_limit() -> u32 {
    10
}
fn default_login_rate_limit() -> u32 {
    20
}
fn default_token_expiry() -> i64 {
    604_800
}
fn default_jwt_leeway() -> u64 {
    30
}
fn default_upload_folder() -> String {
    "weddings".to_string()
}
fn default_media_api_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}
fn default_media_timeout_ms() -> u64 {
    10_000
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml
    /// 2. config/local.toml (optional, not in git)
    /// 3. Environment variables with the WEDDING__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("WEDDING").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Builds a config from embedded defaults plus `overrides`, without
    /// touching the file system.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30
            max_body_size = 1048576

            [database]
            url = ""
            max_connections = 20
            min_connections = 2
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []
            submission_rate_limit_per_minute = 0
            login_rate_limit_per_minute = 0
            hsts_enabled = false

            [jwt]
            secret = "test-secret-key-for-session-tokens-0123456789"
            token_expiry_secs = 604800
            leeway_secs = 0

            [media]
            enabled = false
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "WEDDING__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.jwt.secret.len() < shared::jwt::MIN_SECRET_LEN {
            return Err(ConfigValidationError::InvalidValue(format!(
                "WEDDING__JWT__SECRET must be at least {} bytes",
                shared::jwt::MIN_SECRET_LEN
            )));
        }

        if self.jwt.token_expiry_secs <= 0 {
            return Err(ConfigValidationError::InvalidValue(
                "jwt.token_expiry_secs must be positive".to_string(),
            ));
        }

        if self
            .logging
            .level
            .trim()
            .parse::<tracing_subscriber::filter::LevelFilter>()
            .is_err()
        {
            return Err(ConfigValidationError::InvalidValue(format!(
                "logging.level '{}' is not a log level",
                self.logging.level
            )));
        }

        if self.media.enabled
            && (self.media.cloud_name.is_empty()
                || self.media.api_key.is_empty()
                || self.media.api_secret.is_empty())
        {
            return Err(ConfigValidationError::MissingRequired(
                "media.cloud_name, media.api_key and media.api_secret are required when media is enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    pub fn jwt_config(&self) -> Result<shared::jwt::JwtConfig, shared::jwt::JwtError> {
        shared::jwt::JwtConfig::new(
            &self.jwt.secret,
            self.jwt.token_expiry_secs,
            self.jwt.leeway_secs,
        )
    }
}
