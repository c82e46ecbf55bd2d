use actix_web::{web, HttpResponse};
use chrono::{SecondsFormat, Utc};

use crate::configuration::Environment;
use crate::email_client::EmailClient;

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentReport {
    has_api_key: bool,
    key_preview: String,
    environment: &'static str,
    timestamp: String,
}

/// Reports whether the email provider credentials made it into the process.
pub async fn environment_report(
    email_client: web::Data<EmailClient>,
    environment: web::Data<Environment>,
) -> HttpResponse {
    let report = EnvironmentReport {
        has_api_key: email_client.has_authorization_token(),
        key_preview: email_client
            .token_preview()
            .unwrap_or_else(|| "Not found".to_string()),
        environment: environment.as_str(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    HttpResponse::Ok().json(report)
}
