//! Bot configuration from the environment.
//!
//! Startup fails fast when the bot token is absent: the binary turns
//! [`ConfigError::MissingToken`] into a non-zero exit. The token is wrapped
//! in [`SecretString`] so it never appears in debug output or logs.

use std::path::PathBuf;

use menubot_types::error::ConfigError;
use menubot_types::event::UserId;
use secrecy::SecretString;

/// Env var holding the bot access token.
pub const TOKEN_VAR: &str = "MENUBOT_TOKEN";
/// Legacy alias for the token, checked second.
pub const TOKEN_ALIAS_VAR: &str = "TELEGRAM_TOKEN";
/// Env var holding the administrator identity.
pub const ADMIN_VAR: &str = "ADMIN_ID";
/// Env var overriding the survey file location.
pub const SURVEY_VAR: &str = "MENUBOT_SURVEY";

const DEFAULT_SURVEY_PATH: &str = "survey.toml";

/// Runtime configuration supplied out-of-band.
pub struct BotConfig {
    pub token: SecretString,
    /// The single administrator allowed to mutate the catalog.
    pub admin: UserId,
    pub survey_path: PathBuf,
}

impl BotConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .or_else(|| lookup(TOKEN_ALIAS_VAR))
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let admin_raw = lookup(ADMIN_VAR).ok_or(ConfigError::MissingAdminId)?;
        let admin = admin_raw
            .trim()
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| ConfigError::InvalidAdminId(admin_raw.clone()))?;

        let survey_path = lookup(SURVEY_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SURVEY_PATH));

        Ok(Self {
            token: SecretString::from(token),
            admin,
            survey_path,
        })
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("admin", &self.admin)
            .field("survey_path", &self.survey_path)
            .finish()
    }
}
