use std::path::Path;

use sdk::model::message::{DEFAULT_AVATAR, DEFAULT_BADGE, DEFAULT_USERNAME};
use sdk::Message;

use crate::form::is_url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unable to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid URL in config field: {0}")]
    InvalidUrl(&'static str),

    #[error("Invalid limit: limits.{0} must be greater than zero")]
    InvalidLimit(&'static str),
}

/// Discord's documented ceilings, checked by the form layer and never by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub content: usize,
    pub title: usize,
    pub description: usize,
    pub field_name: usize,
    pub field_value: usize,
    pub author: usize,
    pub footer: usize,

    /// Wire embeds per message, after gallery expansion
    pub embeds: usize,
    pub fields: usize,
    /// Combined embed text per message
    pub embed_total: usize,
    pub files: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            content: 2000,
            title: 256,
            description: 4096,
            field_name: 256,
            field_value: 1024,
            author: 256,
            footer: 2048,
            embeds: 10,
            fields: 25,
            embed_total: 6000,
            files: 10,
        }
    }
}

impl Limits {
    fn validate(&self) -> Result<(), ConfigError> {
        #[rustfmt::skip]
        let limits = [
            ("content", self.content), ("title", self.title), ("description", self.description),
            ("field_name", self.field_name), ("field_value", self.field_value), ("author", self.author),
            ("footer", self.footer), ("embeds", self.embeds), ("fields", self.fields),
            ("embed_total", self.embed_total), ("files", self.files),
        ];

        match limits.into_iter().find(|(_, limit)| *limit == 0) {
            Some((name, _)) => Err(ConfigError::InvalidLimit(name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedConfig {
    /// Username override given to new messages
    #[serde(default = "defaults::default_username")]
    pub username: String,

    /// Avatar override given to new messages
    #[serde(default = "defaults::default_avatar")]
    pub avatar: String,

    #[serde(default = "defaults::default_badge")]
    pub badge: Option<String>,

    /// Pretty-print JSON exports
    #[serde(default = "defaults::default_pretty")]
    pub pretty: bool,

    #[serde(default)]
    pub limits: Limits,
}

#[rustfmt::skip]
mod defaults {
    use super::*;

    pub fn default_username() -> String { DEFAULT_USERNAME.to_owned() }
    pub fn default_avatar() -> String { DEFAULT_AVATAR.to_owned() }
    pub fn default_badge() -> Option<String> { Some(DEFAULT_BADGE.to_owned()) }
    pub const fn default_pretty() -> bool { true }
}

impl Default for ParsedConfig {
    fn default() -> Self {
        ParsedConfig {
            username: defaults::default_username(),
            avatar: defaults::default_avatar(),
            badge: defaults::default_badge(),
            pretty: defaults::default_pretty(),
            limits: Limits::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub parsed: ParsedConfig,
}

impl ParsedConfig {
    pub fn build(self) -> Result<Config, ConfigError> {
        if !is_url(&self.avatar) {
            return Err(ConfigError::InvalidUrl("avatar"));
        }

        self.limits.validate()?;

        Ok(Config { parsed: self })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            parsed: ParsedConfig::default(),
        }
    }
}

impl Config {
    pub fn parse(source: &str) -> Result<Config, ConfigError> {
        toml::de::from_str::<ParsedConfig>(source)?.build()
    }

    /// Loads the config at `path`, using the defaults if there is no such file
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        match std::fs::read_to_string(path) {
            Ok(source) => Config::parse(&source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.parsed.limits
    }

    /// Fresh message carrying the configured overrides
    pub fn new_message(&self) -> Message {
        Message {
            username: self.parsed.username.clone(),
            avatar: self.parsed.avatar.clone(),
            badge: self.parsed.badge.clone(),
            ..Message::new()
        }
    }
}
