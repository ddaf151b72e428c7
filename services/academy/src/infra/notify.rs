//! Confirmation-code delivery over SMTP and an HTTP SMS gateway.
//!
//! A channel without configuration logs the code instead of sending it, which
//! keeps local development usable without mail or SMS credentials.

use std::time::Duration;

use anyhow::Context as _;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::AcademyConfig;
use crate::domain::repository::CodeSender;
use crate::domain::types::CONFIRMATION_CODE_TTL_SECS;
use crate::error::AcademyError;

const DEFAULT_FROM_ADDRESS: &str = "noreply@academy.local";
const SMS_TIMEOUT: Duration = Duration::from_secs(10);

fn code_text(code: &str) -> String {
    format!(
        "Your confirmation code is {code}. It expires in {} minutes.",
        CONFIRMATION_CODE_TTL_SECS / 60
    )
}

// ── SMTP ─────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        from: &str,
    ) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .context("SMTP relay")?
            .port(port);
        if let Some((user, password)) = credentials {
            builder = builder.credentials(Credentials::new(user, password));
        }
        Ok(Self {
            transport: builder.build(),
            from: from.parse().context("SMTP_FROM address")?,
        })
    }

    async fn send(&self, to: &str, code: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse().context("recipient address")?)
            .subject("Your confirmation code")
            .header(ContentType::TEXT_PLAIN)
            .body(code_text(code))
            .context("build confirmation email")?;
        self.transport
            .send(message)
            .await
            .context("send confirmation email")?;
        Ok(())
    }
}

// ── SMS gateway ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SmsGateway {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl SmsGateway {
    pub fn new(url: String, token: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(SMS_TIMEOUT)
            .build()
            .context("build SMS HTTP client")?;
        Ok(Self { client, url, token })
    }

    async fn send(&self, to: &str, code: &str) -> anyhow::Result<()> {
        let mut request = self.client.post(&self.url).json(&serde_json::json!({
            "to": to,
            "message": code_text(code),
        }));
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .context("SMS gateway request")?
            .error_for_status()
            .context("SMS gateway response")?;
        Ok(())
    }
}

// ── Dispatcher ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct Dispatcher {
    pub mailer: Option<Mailer>,
    pub sms: Option<SmsGateway>,
}

impl Dispatcher {
    pub fn from_config(config: &AcademyConfig) -> anyhow::Result<Self> {
        let mailer = match config.smtp_host {
            Some(ref host) => {
                let credentials = config.smtp_user.clone().zip(config.smtp_password.clone());
                let from = config.smtp_from.as_deref().unwrap_or(DEFAULT_FROM_ADDRESS);
                Some(Mailer::new(host, config.smtp_port, credentials, from)?)
            }
            None => None,
        };
        let sms = match config.sms_gateway_url {
            Some(ref url) => Some(SmsGateway::new(
                url.clone(),
                config.sms_gateway_token.clone(),
            )?),
            None => None,
        };
        if mailer.is_none() {
            tracing::warn!("SMTP_HOST not set; confirmation emails will only be logged");
        }
        if sms.is_none() {
            tracing::warn!("SMS_GATEWAY_URL not set; confirmation SMS will only be logged");
        }
        Ok(Self { mailer, sms })
    }
}

impl CodeSender for Dispatcher {
    async fn send_email(&self, to: &str, code: &str) -> Result<(), AcademyError> {
        match self.mailer {
            Some(ref mailer) => mailer.send(to, code).await?,
            None => tracing::info!(to, code, "email dispatch disabled; confirmation code"),
        }
        Ok(())
    }

    async fn send_sms(&self, to: &str, code: &str) -> Result<(), AcademyError> {
        match self.sms {
            Some(ref gateway) => gateway.send(to, code).await?,
            None => tracing::info!(to, code, "SMS dispatch disabled; confirmation code"),
        }
        Ok(())
    }
}
