use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::configuration::SmtpSettings;
use crate::domain::ContactEmail;

use super::composer::OutgoingEmail;

/// The single seam between the submission pipeline and the outside world.
/// Implementations do not retry; every transport failure propagates.
#[cfg_attr(test, mockall::automock)]
pub trait MailRelay: Send + Sync + 'static {
    fn send(&self, email: OutgoingEmail) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Outgoing mail over a real SMTP relay, built once at startup.
#[derive(Clone)]
pub struct SmtpMailRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailRelay {
    pub fn new(
        smtp: &SmtpSettings,
        sender_name: &str,
        sender: &ContactEmail,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let address: Address = sender
            .as_ref()
            .parse()
            .context("Invalid sender email address")?;
        let from = Mailbox::new(Some(sender_name.to_string()), address);

        // Port 465 is SMTPS; everything else upgrades via STARTTLS.
        let builder = if smtp.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
        }
        .context("Failed to set up the SMTP relay")?;

        let transport = builder
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.expose_secret().to_owned(),
            ))
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport, from })
    }
}

impl MailRelay for SmtpMailRelay {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        let OutgoingEmail {
            to,
            reply_to,
            subject,
            html,
            text,
        } = email;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(
                None,
                to.as_ref().parse().context("Invalid recipient address")?,
            ))
            .subject(subject);

        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(Mailbox::new(
                None,
                reply_to
                    .as_ref()
                    .parse()
                    .context("Invalid reply-to address")?,
            ));
        }

        let message = builder
            .multipart(MultiPart::alternative_plain_html(text, html))
            .context("Failed to assemble the email message")?;

        let response = self
            .transport
            .send(message)
            .await
            .context("Failed to hand the message to the SMTP relay")?;
        if !response.is_positive() {
            anyhow::bail!("SMTP relay refused the message: {}", response.code());
        }

        Ok(())
    }
}

/// Disposable in-process mailbox used when no SMTP credentials are
/// configured. Deliveries are logged and kept in memory for inspection.
#[derive(Clone, Default)]
pub struct SandboxMailRelay {
    mailbox: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl SandboxMailRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<OutgoingEmail> {
        self.mailbox
            .lock()
            .expect("Sandbox mailbox lock poisoned")
            .clone()
    }
}

impl MailRelay for SandboxMailRelay {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        tracing::info!(
            recipient = %email.to,
            subject = %email.subject,
            "Delivered an email to the sandbox mailbox"
        );
        self.mailbox
            .lock()
            .expect("Sandbox mailbox lock poisoned")
            .push(email);
        Ok(())
    }
}
