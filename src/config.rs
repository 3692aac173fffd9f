use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_AUTO_REPLY_TEMPLATE_ID: &str = "template_auto_reply";
pub const DEFAULT_HR_RECIPIENT: &str = "hr@shahipickle.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub emailjs: EmailJsConfig,
    pub public_rps: u32,
    pub allowed_origin: Option<String>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub api_url: Url,
    pub service_id: String,
    pub template_id: String,
    pub auto_reply_template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub hr_recipient: String,
    pub timeout_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_url = get_env_or("EMAILJS_API_URL", DEFAULT_EMAILJS_API_URL);
        let api_url = Url::parse(&api_url)
            .map_err(|e| Error::Config(format!("Invalid value for EMAILJS_API_URL: {}", e)))?;

        let log_format = match env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            emailjs: EmailJsConfig {
                api_url,
                service_id: get_env("EMAILJS_SERVICE_ID")?,
                template_id: get_env("EMAILJS_TEMPLATE_ID")?,
                auto_reply_template_id: get_env_or(
                    "EMAILJS_AUTO_REPLY_TEMPLATE_ID",
                    DEFAULT_AUTO_REPLY_TEMPLATE_ID,
                ),
                public_key: get_env("EMAILJS_PUBLIC_KEY")?,
                private_key: get_optional_env("EMAILJS_PRIVATE_KEY"),
                hr_recipient: get_env_or("HR_RECIPIENT_EMAIL", DEFAULT_HR_RECIPIENT),
                timeout_secs: get_env_parse_or("MAIL_TIMEOUT_SECS", 15)?,
            },
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
            allowed_origin: get_optional_env("ALLOWED_ORIGIN"),
            log_format,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_optional_env(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional_env(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_default_when_unset() {
        let value: u32 = get_env_parse_or("CAREERS_TEST_UNSET_RPS", 20).unwrap();
        assert_eq!(value, 20);
    }

    #[test]
    fn parse_rejects_garbage() {
        env::set_var("CAREERS_TEST_BAD_RPS", "many");
        let err = get_env_parse_or::<u32>("CAREERS_TEST_BAD_RPS", 20).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("CAREERS_TEST_BAD_RPS")));
    }

    #[test]
    fn blank_optional_values_are_ignored() {
        env::set_var("CAREERS_TEST_BLANK", "   ");
        assert_eq!(get_optional_env("CAREERS_TEST_BLANK"), None);
        assert_eq!(get_env_or("CAREERS_TEST_BLANK", "fallback"), "fallback");
    }
}
