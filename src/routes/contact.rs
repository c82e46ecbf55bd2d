use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::{DateTime, Utc};
use htmlescape::{encode_attribute, encode_minimal};

use crate::domain::{validation, ContactFields, ContactSubmission, FormErrors};
use crate::email_client::EmailClient;
use crate::startup::{ApplicationBaseUrl, ContactRecipient};
use crate::utils::{error_chain_fmt, json_error};

const DEFAULT_SUBJECT: &str = "Portfolio Inquiry";

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{message}")]
    ValidationError {
        message: &'static str,
        fields: FormErrors,
    },
    #[error("Failed to send email")]
    DeliveryError(#[source] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<FormErrors> for ContactError {
    fn from(fields: FormErrors) -> Self {
        let message = if fields.has_missing_fields() {
            "Missing required fields"
        } else {
            validation::EMAIL_INVALID
        };
        ContactError::ValidationError { message, fields }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ContactError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ContactError::ValidationError { message, fields } => {
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "error": message,
                    "fields": fields,
                }))
            }
            ContactError::DeliveryError(e) => {
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "error": self.to_string(),
                    "details": format!("{:#}", e),
                }))
            }
        }
    }
}

#[derive(serde::Serialize)]
struct ContactAccepted {
    success: bool,
    message: &'static str,
    id: String,
}

#[tracing::instrument(
    name = "Forward a contact message",
    skip(body, email_client, recipient, base_url),
    fields(
        sender_email = %body.email,
        sender_name = %body.name
    )
)]
pub async fn send_contact_message(
    body: web::Json<ContactFields>,
    email_client: web::Data<EmailClient>,
    recipient: web::Data<ContactRecipient>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, ContactError> {
    let submission = ContactSubmission::try_from(body.0)?;
    let received_at = Utc::now();

    let sent = email_client
        .send_email(
            &recipient.0,
            submission.email(),
            &email_subject(&submission),
            &html_body(&submission, &base_url.0, received_at),
            &text_body(&submission, &base_url.0, received_at),
        )
        .await
        .context("The email provider did not accept the contact message")
        .map_err(ContactError::DeliveryError)?;

    tracing::info!(email_id = %sent.id, "Contact message forwarded");
    Ok(HttpResponse::Ok().json(ContactAccepted {
        success: true,
        message: "Email sent successfully",
        id: sent.id,
    }))
}

pub async fn contact_method_not_allowed() -> HttpResponse {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn email_subject(submission: &ContactSubmission) -> String {
    format!(
        "New Contact: {} - {}",
        submission.subject_or(DEFAULT_SUBJECT),
        submission.name()
    )
}

fn received_on(received_at: DateTime<Utc>) -> String {
    received_at.format("%B %-d, %Y, %I:%M %p UTC").to_string()
}

fn reply_link(submission: &ContactSubmission) -> String {
    let subject = format!("Re: {}", submission.subject_or(DEFAULT_SUBJECT));
    let body = format!(
        "Hi {},\r\n\r\nThank you for reaching out through my portfolio. ",
        submission.first_name()
    );
    format!(
        "mailto:{}?subject={}&body={}",
        submission.email(),
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

fn html_body(submission: &ContactSubmission, base_url: &str, received_at: DateTime<Utc>) -> String {
    let name = encode_minimal(submission.name());
    let email = encode_minimal(submission.email().as_ref());
    let subject = encode_minimal(submission.subject_or("General Inquiry"));
    let message = encode_minimal(submission.message());
    let first_name = encode_minimal(submission.first_name());
    let reply_link = encode_attribute(&reply_link(submission));
    let mailto_sender = encode_attribute(&format!("mailto:{}", submission.email()));
    let site = encode_minimal(base_url);
    let date = received_on(received_at);
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Portfolio Contact</title>
  </head>
  <body style="margin: 0; padding: 0; background-color: #f8f9fa; font-family: 'Segoe UI', Tahoma, sans-serif;">
    <div style="max-width: 600px; margin: 40px auto; background: white;">
      <div style="padding: 40px 40px 30px 40px; border-bottom: 3px solid #2c3e50;">
        <h1 style="color: #2c3e50; margin: 0; font-size: 28px; font-weight: 300;">Portfolio Contact</h1>
        <p style="color: #7f8c8d; margin: 8px 0 0 0;">New inquiry received</p>
      </div>
      <div style="padding: 40px;">
        <h2 style="color: #34495e; font-size: 20px; font-weight: 500;">Contact Information</h2>
        <table style="width: 100%; border-collapse: collapse; font-size: 15px;">
          <tr><td style="padding: 12px 0; color: #7f8c8d; width: 120px;">Name</td><td style="padding: 12px 0;">{name}</td></tr>
          <tr><td style="padding: 12px 0; color: #7f8c8d;">Email</td><td style="padding: 12px 0;"><a href="{mailto_sender}">{email}</a></td></tr>
          <tr><td style="padding: 12px 0; color: #7f8c8d;">Subject</td><td style="padding: 12px 0;">{subject}</td></tr>
          <tr><td style="padding: 12px 0; color: #7f8c8d;">Date</td><td style="padding: 12px 0;">{date}</td></tr>
        </table>
        <h3 style="color: #34495e; font-size: 18px; font-weight: 500;">Message</h3>
        <div style="background: #f8f9fa; padding: 25px; border-left: 4px solid #3498db;">
          <p style="margin: 0; line-height: 1.7; white-space: pre-wrap;">{message}</p>
        </div>
        <div style="text-align: center; margin: 40px 0 20px 0;">
          <a href="{reply_link}" style="background: #3498db; color: white; padding: 15px 30px; text-decoration: none; border-radius: 4px;">Reply to {first_name}</a>
        </div>
      </div>
      <div style="background: #ecf0f1; padding: 25px 40px; text-align: center;">
        <p style="margin: 0; color: #7f8c8d; font-size: 13px;">
          This message was sent through your portfolio contact form at<br>
          <strong>{site}</strong>
        </p>
      </div>
    </div>
  </body>
</html>"#
    )
}

fn text_body(submission: &ContactSubmission, base_url: &str, received_at: DateTime<Utc>) -> String {
    format!(
        "New inquiry received\n\nName: {}\nEmail: {}\nSubject: {}\nDate: {}\n\nMessage:\n{}\n\n--\nSent through the portfolio contact form at {}",
        submission.name(),
        submission.email(),
        submission.subject_or("General Inquiry"),
        received_on(received_at),
        submission.message(),
        base_url
    )
}
