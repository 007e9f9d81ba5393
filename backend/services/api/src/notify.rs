use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use profileera_common::error::{ProfileEraError, ProfileEraResult};
use profileera_common::types::LeadView;
use profileera_config::AppConfig;
use profileera_db::lead::models::Lead;
use tokio::task::JoinHandle;

#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify(&self, lead: &Lead) -> ProfileEraResult<()>;
}

/// Fire the notification for `lead` without waiting for it.
///
/// A failed send is only logged. It never fails the request or removes the
/// stored lead, and is not retried. The handle is returned for tests; request
/// handlers drop it.
pub fn dispatch(notifier: Arc<dyn LeadNotifier>, lead: Lead) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&lead).await {
            Ok(()) => tracing::info!(lead_id = %lead.id, "lead notification sent"),
            Err(e) => {
                tracing::error!(lead_id = %lead.id, error = %e, "failed to send lead notification")
            }
        }
    })
}

pub struct LeadEmail {
    pub subject: String,
    pub body: String,
}

pub fn compose(lead: &Lead) -> LeadEmail {
    LeadEmail {
        subject: format!("New Lead: {}", lead.name),
        body: format!(
            "You have a new lead!\n\nName: {}\nContact: {}\nLinkedIn: {}\nNaukri: {}",
            lead.name,
            lead.contact,
            LeadView::display_url(lead.linkedin.clone()),
            LeadView::display_url(lead.naukri.clone()),
        ),
    }
}

/// Sends through an authenticated SMTP relay, from the mail account to the
/// admin address.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn from_config(config: &AppConfig) -> ProfileEraResult<Self> {
        let from = parse_mailbox("EMAIL_USER", &config.email_user)?;
        let to = parse_mailbox("ADMIN_EMAIL", &config.admin_email)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ProfileEraError::Mail(format!("invalid SMTP relay: {e}")))?
            .credentials(Credentials::new(
                config.email_user.clone(),
                config.email_pass.clone(),
            ))
            .build();

        Ok(Self { transport, from, to })
    }
}

fn parse_mailbox(key: &str, value: &str) -> ProfileEraResult<Mailbox> {
    value
        .parse()
        .map_err(|e| ProfileEraError::Config(format!("{key} is not a valid address: {e}")))
}

#[async_trait]
impl LeadNotifier for SmtpNotifier {
    async fn notify(&self, lead: &Lead) -> ProfileEraResult<()> {
        let email = compose(lead);
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|e| ProfileEraError::Mail(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| ProfileEraError::Mail(e.to_string()))?;
        tracing::debug!(code = %response.code(), "smtp relay accepted message");
        Ok(())
    }
}
