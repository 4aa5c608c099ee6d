use std::env;
use std::str::FromStr;

pub const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
pub const DEFAULT_MAIL_FROM: &str = "francisco.orta@ieee.org";

/// Which mail delivery implementation to run with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackend {
    SendGrid,
    /// Log the message instead of sending it (local development)
    Log,
}

impl MailBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailBackend::SendGrid => "sendgrid",
            MailBackend::Log => "log",
        }
    }
}

impl FromStr for MailBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sendgrid" => Ok(MailBackend::SendGrid),
            "log" => Ok(MailBackend::Log),
            other => Err(ConfigError::UnknownMailBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub mail_backend: MailBackend,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_api_url: String,
    pub mail_from: String,
    pub trigger_token: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mail_backend = match lookup("MAIL_BACKEND") {
            Some(value) => value.parse::<MailBackend>()?,
            None => MailBackend::SendGrid,
        };

        let sendgrid_api_key = lookup("SENDGRID_API_KEY").filter(|k| !k.trim().is_empty());
        if mail_backend == MailBackend::SendGrid && sendgrid_api_key.is_none() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            mail_backend,
            sendgrid_api_key,
            sendgrid_api_url: lookup("SENDGRID_API_URL")
                .unwrap_or_else(|| DEFAULT_SENDGRID_API_URL.to_string()),
            mail_from: lookup("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            trigger_token: lookup("TRIGGER_TOKEN").filter(|t| !t.is_empty()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("SENDGRID_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("Unknown MAIL_BACKEND: {0}")]
    UnknownMailBackend(String),
}
