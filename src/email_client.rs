use anyhow::Context;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};

use crate::configuration::{EmailClientSettings, SmtpRelay, SmtpTls};
use crate::domain::Notification;

/// Anything able to deliver a composed notification.
///
/// The handler only cares whether delivery completed; the error is logged, never shown.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_mail(&self, notification: &Notification) -> Result<(), anyhow::Error>;
}

/// Delivers notifications through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(
        relay: SmtpRelay,
        username: String,
        app_password: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let builder = match relay.tls {
            SmtpTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&relay.host)?,
            SmtpTls::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&relay.host)?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&relay.host),
        };
        // the timeout applies to every SMTP command, not to the whole exchange
        let builder = builder.port(relay.port).timeout(Some(timeout));
        let builder = match relay.tls {
            // never hand the app password to a plaintext connection
            SmtpTls::None => builder,
            SmtpTls::Tls | SmtpTls::Starttls => builder.credentials(Credentials::new(
                username,
                app_password.expose_secret().to_owned(),
            )),
        };

        Ok(Self {
            transport: builder.build(),
        })
    }

    pub fn from_settings(settings: &EmailClientSettings) -> Result<Self, anyhow::Error> {
        let relay = settings.relay().map_err(anyhow::Error::msg)?;
        Self::new(
            relay,
            settings.username.clone(),
            settings.app_password.clone(),
            settings.timeout(),
        )
        .context("Failed to configure the SMTP transport")
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    #[tracing::instrument(
        name = "Sending a notification over SMTP",
        skip(self, notification),
        fields(subject = %notification.subject)
    )]
    async fn send_mail(&self, notification: &Notification) -> Result<(), anyhow::Error> {
        let message = build_message(notification).context("Failed to build the email message")?;
        let response = self
            .transport
            .send(message)
            .await
            .context("The SMTP relay did not accept the message")?;
        tracing::debug!(code = %response.code(), "SMTP relay accepted the message");
        Ok(())
    }
}

/// Builds a multipart/alternative message so clients without HTML still get a readable body.
fn build_message(notification: &Notification) -> Result<Message, lettre::error::Error> {
    let mut builder = Message::builder()
        .from(Mailbox::new(None, notification.from.clone()))
        .to(Mailbox::new(None, notification.to.clone()))
        .subject(notification.subject.as_str());
    if let Some(reply_to) = &notification.reply_to {
        builder = builder.reply_to(Mailbox::new(None, reply_to.clone()));
    }
    builder.multipart(MultiPart::alternative_plain_html(
        notification.text.clone(),
        notification.html.clone(),
    ))
}
