use serde::Deserialize;

use academy_core::config::Config;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SMTP_PORT: u16 = 587;

/// Academy service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AcademyConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (confirmation codes, refresh-token blacklist).
    pub redis_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// TCP port to listen on. Env var: `ACADEMY_PORT`.
    #[serde(default = "default_port")]
    pub academy_port: u16,

    /// Email dispatch is disabled when unset.
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,

    /// SMS dispatch is disabled when unset.
    pub sms_gateway_url: Option<String>,
    pub sms_gateway_token: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

impl Config for AcademyConfig {}
