/// Mailer: the single point of entry for outbound email.
///
/// Wraps the Resend HTTP API. The destination is fixed at construction time
/// (back-office inbox), so callers only provide subject and body.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

/// Outbound notification collaborator. Held as `Arc<dyn Notifier>` in
/// `AppState` so tests can swap in a recording double.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message and returns the provider's message id.
    async fn send(&self, subject: &str, html: &str) -> Result<String, MailError>;
}

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
    to: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String, to: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            from,
            to,
        }
    }
}

#[async_trait]
impl Notifier for ResendMailer {
    async fn send(&self, subject: &str, html: &str) -> Result<String, MailError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: vec![&self.to],
            subject,
            html,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ResendError>()
                .await
                .map(|e| e.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SendEmailResponse = response.json().await?;
        debug!("Notification sent (id: {})", parsed.id);
        Ok(parsed.id)
    }
}
