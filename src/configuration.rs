use lettre::Address;
use secrecy::Secret;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    // env vars are always strings, so let serde-aux parse the port out of one
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Shown in the footer of every contact notification.
    pub business_name: String,
}

/// Which SMTP relay the contact notifications go through.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    Gmail,
    Outlook,
    Custom,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// TLS from the first byte (SMTPS).
    #[default]
    Tls,
    Starttls,
    /// Plaintext; only meant for a local capture server. Credentials are not sent.
    None,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub provider: MailProvider,
    pub smtp_host: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub smtp_port: Option<u16>,
    #[serde(default)]
    pub smtp_tls: SmtpTls,
    pub username: String,
    pub app_password: Secret<String>,
    pub sender_email: String,
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub reply_to_submitter: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<Address, String> {
        self.sender_email
            .parse()
            .map_err(|e| format!("{} is not a valid sender address: {}", self.sender_email, e))
    }

    /// Falls back to the sender mailbox, so the business mails its own inbox.
    pub fn recipient(&self) -> Result<Address, String> {
        let recipient = self
            .recipient_email
            .as_deref()
            .unwrap_or(&self.sender_email);
        recipient
            .parse()
            .map_err(|e| format!("{} is not a valid recipient address: {}", recipient, e))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    /// Resolves the relay host, port and TLS mode for the configured provider.
    pub fn relay(&self) -> Result<SmtpRelay, String> {
        match self.provider {
            MailProvider::Gmail => Ok(SmtpRelay {
                host: "smtp.gmail.com".into(),
                port: self.smtp_port.unwrap_or(465),
                tls: SmtpTls::Tls,
            }),
            MailProvider::Outlook => Ok(SmtpRelay {
                host: "smtp.office365.com".into(),
                port: self.smtp_port.unwrap_or(587),
                tls: SmtpTls::Starttls,
            }),
            MailProvider::Custom => {
                let host = self
                    .smtp_host
                    .clone()
                    .ok_or_else(|| "smtp_host is required for the custom provider".to_string())?;
                let port = self.smtp_port.unwrap_or(match self.smtp_tls {
                    SmtpTls::Tls => 465,
                    SmtpTls::Starttls => 587,
                    SmtpTls::None => 25,
                });
                Ok(SmtpRelay {
                    host,
                    port,
                    tls: self.smtp_tls,
                })
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpRelay {
    pub host: String,
    pub port: u16,
    pub tls: SmtpTls,
}

/// Reads the layered configuration: `base.yaml`, then the environment-specific file picked by
/// `APP_ENVIRONMENT`, then `APP_`-prefixed environment variables
/// (e.g. `APP_EMAIL_CLIENT__APP_PASSWORD`).
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}

/// The possible runtime environments for the application.
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

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
