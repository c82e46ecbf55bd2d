use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::{Environment, Settings};
use crate::domain::ContactEmail;
use crate::email_client::EmailClient;
use crate::routes::{
    contact_method_not_allowed, environment_report, health_check, send_contact_message,
};
use crate::utils::json_error;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let recipient = configuration
            .contact
            .owner()
            .map_err(|e| anyhow::anyhow!(e))?;
        let email_client = configuration.email_client.client();

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_client,
            recipient,
            configuration.application.base_url,
            Environment::current(),
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub struct ApplicationBaseUrl(pub String);

/// Where the contact endpoint delivers messages.
pub struct ContactRecipient(pub ContactEmail);

fn run(
    listener: TcpListener,
    email_client: EmailClient,
    recipient: ContactEmail,
    base_url: String,
    environment: Environment,
) -> Result<Server, anyhow::Error> {
    let email_client = web::Data::new(email_client);
    let recipient = web::Data::new(ContactRecipient(recipient));
    let base_url = web::Data::new(ApplicationBaseUrl(base_url));
    let environment = web::Data::new(environment);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let response = json_error(StatusCode::BAD_REQUEST, "Invalid JSON body");
                actix_web::error::InternalError::from_response(err, response).into()
            }))
            .route("/health_check", web::get().to(health_check))
            .route("/api/test-env", web::get().to(environment_report))
            .service(
                web::resource("/api/contact")
                    .route(web::post().to(send_contact_message))
                    .default_service(web::to(contact_method_not_allowed)),
            )
            .app_data(email_client.clone())
            .app_data(recipient.clone())
            .app_data(base_url.clone())
            .app_data(environment.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
