use reqwest::Client;
use uuid::Uuid;

use crate::domain::ContactSubmission;

/// Identifier of a message the relay accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryId(String);

impl DeliveryId {
    fn minted() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for DeliveryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    #[error("Failed to reach the delivery endpoint")]
    Transport(#[source] reqwest::Error),
    #[error("{reason}")]
    Rejected { status: u16, reason: String },
    #[error("The delivery endpoint answered {status} with an unreadable body")]
    MalformedResponse {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(serde::Serialize)]
struct RelayRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    #[serde(rename = "_replyto")]
    reply_to: &'a str,
    #[serde(rename = "_subject")]
    subject_line: String,
}

#[derive(serde::Deserialize, Default)]
struct RelayResponse {
    success: Option<bool>,
    ok: Option<bool>,
    id: Option<String>,
    error: Option<String>,
}

impl RelayResponse {
    fn rejection(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if self.success == Some(false) || self.ok == Some(false) {
            return Some("The delivery endpoint rejected the message".to_string());
        }
        None
    }
}

/// Posts contact submissions to a form relay (a hosted form service or the
/// site's own `/api/contact` endpoint). One attempt per call.
pub struct RelayClient {
    http_client: Client,
    endpoint: String,
    default_subject: String,
}

impl RelayClient {
    pub fn new(endpoint: String, default_subject: String, timeout: std::time::Duration) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            http_client,
            endpoint,
            default_subject,
        }
    }

    #[tracing::instrument(
        name = "Send a contact submission to the relay",
        skip_all,
        fields(endpoint = %self.endpoint, sender = %submission.email())
    )]
    pub async fn send(&self, submission: &ContactSubmission) -> Result<DeliveryId, DeliveryError> {
        let request_body = RelayRequest {
            name: submission.name(),
            email: submission.email().as_ref(),
            subject: submission.subject_or(&self.default_subject),
            message: submission.message(),
            reply_to: submission.email().as_ref(),
            subject_line: format!(
                "{}: {}",
                self.default_subject,
                submission.subject_or("New Message")
            ),
        };
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<RelayResponse>().await.unwrap_or_default();
            let reason = body
                .error
                .unwrap_or_else(|| format!("Server responded with {}", status.as_u16()));
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.json::<RelayResponse>().await.map_err(|e| {
            DeliveryError::MalformedResponse {
                status: status.as_u16(),
                source: e,
            }
        })?;
        if let Some(reason) = body.rejection() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }
        Ok(body.id.map(DeliveryId).unwrap_or_else(DeliveryId::minted))
    }
}
