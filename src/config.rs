use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    /// Allowed CORS origins. Empty (or `*`) means any origin is accepted.
    pub cors_origins: Vec<HeaderValue>,
    pub max_body_size: usize,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    /// Operator mailbox that receives contact notifications.
    pub to: String,
    pub tls: TlsMode,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    StartTls,
    Tls,
    None,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(TlsMode::StartTls),
            "tls" => Ok(TlsMode::Tls),
            "none" => Ok(TlsMode::None),
            other => Err(format!(
                "unknown TLS mode '{other}' (expected starttls, tls or none)"
            )),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database_url = env.required("DATABASE_URL")?;

        let database_max_connections: u32 = env
            .or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid DATABASE_MAX_CONNECTIONS: {e}"))?;

        let host: IpAddr = env
            .or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env
            .or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let cors_origins = env
            .or("CORS_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "*")
            .map(|s| {
                HeaderValue::from_str(s)
                    .map_err(|e| format!("Invalid CORS_ORIGINS entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let max_body_size: usize = env
            .or("MAX_BODY_SIZE", "102400")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let log_level = env.or("LOG_LEVEL", "info");

        let smtp = match (env.get("EMAIL_USER"), env.get("EMAIL_PASS")) {
            (Some(user), Some(pass)) => {
                let port: u16 = env
                    .or("SMTP_PORT", "587")
                    .parse()
                    .map_err(|e| format!("Invalid SMTP_PORT: {e}"))?;
                let tls: TlsMode = env
                    .or("SMTP_TLS", "starttls")
                    .parse()
                    .map_err(|e| format!("Invalid SMTP_TLS: {e}"))?;
                let timeout_secs: u64 = env
                    .or("SMTP_TIMEOUT_SECS", "10")
                    .parse()
                    .map_err(|e| format!("Invalid SMTP_TIMEOUT_SECS: {e}"))?;

                Some(SmtpConfig {
                    host: env.or("SMTP_HOST", "smtp.gmail.com"),
                    port,
                    to: env.get("EMAIL_TO").unwrap_or_else(|| user.clone()),
                    user,
                    pass,
                    tls,
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            _ => None,
        };

        Ok(Config {
            database_url,
            database_max_connections,
            host,
            port,
            cors_origins,
            max_body_size,
            log_level,
            smtp,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank values are treated the same.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, String> {
        self.get(key)
            .ok_or_else(|| format!("Missing required environment variable: {key}"))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}
