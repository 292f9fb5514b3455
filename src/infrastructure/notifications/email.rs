//! # SMTP Alert Notifier
//!
//! Sends alert digests as plain-text email over STARTTLS.
//!
//! One message goes to all recipients, sent from the SMTP login account.

use crate::domain::services::Alert;
use crate::infrastructure::notifications::AlertNotifier;
use crate::infrastructure::notifications::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default SMTP command timeout in milliseconds.
pub const DEFAULT_SMTP_TIMEOUT_MS: u64 = 30_000;

/// SMTP connection and addressing settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// Relay host name.
    pub server: String,
    /// Relay port.
    pub port: u16,
    /// Login name, also used as the sender address.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Recipient addresses.
    pub recipients: Vec<String>,
    /// Command timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: String::new(),
            recipients: Vec::new(),
            timeout_ms: DEFAULT_SMTP_TIMEOUT_MS,
        }
    }
}

impl SmtpConfig {
    /// Creates settings for a relay and login.
    #[must_use]
    pub fn new(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Sets the relay port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Adds a recipient.
    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    /// Returns true if a relay host is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.server.trim().is_empty()
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("recipients", &self.recipients)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Builds the subject line for an alert digest.
#[must_use]
pub fn alert_subject(alerts: &[Alert]) -> String {
    match alerts {
        [single] => format!("Settlement risk alert: {}", single.title),
        _ => format!("Settlement risk alerts: {} breaches", alerts.len()),
    }
}

/// Builds the plain-text body for an alert digest.
#[must_use]
pub fn alert_body(alerts: &[Alert]) -> String {
    let mut body = String::from("The following settlement risk thresholds were exceeded:\n\n");
    for alert in alerts {
        body.push_str(&format!(
            "- [{}] {}\n  {}\n  observed {} / threshold {}\n",
            alert.severity, alert.title, alert.description, alert.observed, alert.threshold
        ));
    }
    body
}

fn parse_mailbox(address: &str) -> NotificationResult<Mailbox> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| NotificationError::invalid_address(address, e.to_string()))
}

/// Alert notifier backed by an SMTP relay.
#[derive(Clone)]
pub struct SmtpAlertNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
    server: String,
}

impl SmtpAlertNotifier {
    /// Creates a notifier. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::Configuration` if no relay is set,
    /// `NotificationError::NoRecipients` if the recipient list is empty,
    /// or `NotificationError::InvalidAddress` for an unparseable address.
    pub fn new(config: &SmtpConfig) -> NotificationResult<Self> {
        if !config.is_configured() {
            return Err(NotificationError::configuration("SMTP server is not set"));
        }
        let from = parse_mailbox(&config.username)?;
        let recipients = config
            .recipients
            .iter()
            .filter(|r| !r.trim().is_empty())
            .map(|r| parse_mailbox(r))
            .collect::<NotificationResult<Vec<_>>>()?;
        if recipients.is_empty() {
            return Err(NotificationError::NoRecipients);
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(config.server.trim())
            .map_err(|e| NotificationError::configuration(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_millis(config.timeout_ms)))
            .build();

        Ok(Self {
            transport,
            from,
            recipients,
            server: config.server.trim().to_string(),
        })
    }

    /// Returns the recipient count.
    #[must_use]
    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }

    /// Assembles the digest message.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::Build` if the message is rejected by the builder.
    pub fn build_message(&self, alerts: &[Alert]) -> NotificationResult<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(alert_subject(alerts))
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        builder
            .body(alert_body(alerts))
            .map_err(|e| NotificationError::build(e.to_string()))
    }
}

impl fmt::Debug for SmtpAlertNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpAlertNotifier")
            .field("server", &self.server)
            .field("from", &self.from.to_string())
            .field("recipients", &self.recipients.len())
            .finish()
    }
}

#[async_trait]
impl AlertNotifier for SmtpAlertNotifier {
    async fn notify(&self, alerts: &[Alert]) -> NotificationResult<()> {
        if alerts.is_empty() {
            return Ok(());
        }
        let message = self.build_message(alerts)?;
        match self.transport.send(message).await {
            Ok(response) => {
                tracing::info!(
                    alerts = alerts.len(),
                    recipients = self.recipients.len(),
                    code = %response.code(),
                    "sent alert email"
                );
                Ok(())
            }
            Err(e) => {
                let transient = e.is_transient() || e.is_timeout();
                tracing::warn!(error = %e, transient, "alert email failed");
                Err(NotificationError::transport(e.to_string(), transient))
            }
        }
    }
}
