use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub cors_origin: Option<String>,
    pub log_json: bool,
    pub email: EmailConfig,
}

/// Credentials for the outbound email providers. Every field is optional;
/// which ones are present decides the provider chosen at startup.
#[derive(Debug, Clone, Default)]
pub struct EmailConfig {
    pub resend_api_key: Option<String>,
    pub from: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_secure: Option<bool>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank
    /// values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL")
            .ok_or_else(|| Error::Config("Missing environment variable: DATABASE_URL".into()))?;

        Ok(Self {
            port: parse_or("PORT", get("PORT"), 3000)?,
            database_url,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 10)?,
            cors_origin: get("CORS_ORIGIN"),
            log_json: get("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            email: EmailConfig {
                resend_api_key: get("RESEND_API_KEY"),
                from: get("EMAIL_FROM"),
                smtp_user: get("EMAIL_USER"),
                smtp_password: get("EMAIL_PASS"),
                smtp_host: get("SMTP_HOST"),
                smtp_port: get("SMTP_PORT")
                    .map(|raw| parse("SMTP_PORT", &raw))
                    .transpose()?,
                smtp_secure: get("SMTP_SECURE")
                    .map(|raw| parse_flag("SMTP_SECURE", &raw))
                    .transpose()?,
            },
        })
    }
}

fn parse<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => parse(name, &raw),
        None => Ok(default),
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(Error::Config(format!(
            "Invalid value for {}: {} (expected true/false)",
            name, other
        ))),
    }
}
