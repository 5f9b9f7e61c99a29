use std::time::Duration;

use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::ContactEmail;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub mail: MailSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct MailSettings {
    pub sender_name: String,
    pub sender_email: String,
    pub owner_email: Option<String>,
    pub smtp_host: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<SecretString>,
    pub timeout_ms: u64,
}

/// How outgoing mail leaves the process. Resolved once at startup; nothing
/// downstream inspects environment variables after this point.
#[derive(Debug, Clone)]
pub enum RelayMode {
    Configured(SmtpSettings),
    SandboxFallback,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

impl MailSettings {
    pub fn relay_mode(&self) -> RelayMode {
        match (&self.smtp_host, &self.smtp_user, &self.smtp_pass) {
            (Some(host), Some(user), Some(pass)) => RelayMode::Configured(SmtpSettings {
                host: host.clone(),
                port: self.smtp_port,
                username: user.clone(),
                password: pass.clone(),
            }),
            _ => RelayMode::SandboxFallback,
        }
    }

    pub fn sender(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.sender_email.clone())
    }

    /// Notifications go to the configured owner mailbox, falling back to the
    /// SMTP account itself and finally to the sender address.
    pub fn owner(&self) -> Result<ContactEmail, String> {
        let address = self
            .owner_email
            .clone()
            .or_else(|| self.smtp_user.clone())
            .unwrap_or_else(|| self.sender_email.clone());
        ContactEmail::parse(address)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

pub fn get_environment() -> Environment {
    std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENV")
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine current directory");
    let conf_dir = base_path.join("configuration");
    let env = get_environment();

    let settings = config::Config::builder()
        .add_source(
            config::File::with_name(
                conf_dir
                    .join("base")
                    .to_str()
                    .expect("Failed to read base configuration"),
            )
            .required(true),
        )
        .add_source(
            config::File::with_name(
                conf_dir
                    .join(env.as_str())
                    .to_str()
                    .expect("Failed to read environment configuration"),
            )
            .required(true),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        // The deployment contract uses plain EMAIL_*/OWNER_EMAIL variables;
        // presence of host, user and password switches the relay mode.
        .set_override_option("mail.smtp_host", std::env::var("EMAIL_HOST").ok())?
        .set_override_option("mail.smtp_port", std::env::var("EMAIL_PORT").ok())?
        .set_override_option("mail.smtp_user", std::env::var("EMAIL_USER").ok())?
        .set_override_option("mail.smtp_pass", std::env::var("EMAIL_PASS").ok())?
        .set_override_option("mail.owner_email", std::env::var("OWNER_EMAIL").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}
