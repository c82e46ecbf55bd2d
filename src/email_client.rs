use crate::domain::ContactEmail;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: String,
    authorization_token: Secret<String>,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(serde::Deserialize, Debug)]
pub struct SentEmail {
    pub id: String,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }

    pub fn has_authorization_token(&self) -> bool {
        !self.authorization_token.expose_secret().is_empty()
    }

    /// A short, non-reversible hint of the configured token.
    pub fn token_preview(&self) -> Option<String> {
        let token = self.authorization_token.expose_secret();
        if token.is_empty() {
            return None;
        }
        let preview: String = token.chars().take(8).collect();
        Some(format!("{}...", preview))
    }

    #[tracing::instrument(
        name = "Send an email through the provider",
        skip_all,
        fields(recipient = %recipient, reply_to = %reply_to, subject = %subject)
    )]
    pub async fn send_email(
        &self,
        recipient: &ContactEmail,
        reply_to: &ContactEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<SentEmail, reqwest::Error> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: [recipient.as_ref()],
            reply_to: reply_to.as_ref(),
            subject,
            html: html_content,
            text: text_content,
        };
        self.http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json::<SentEmail>()
            .await
    }
}
