use once_cell::sync::Lazy;
use portfolio_contact::configuration::get_configuration;
use portfolio_contact::contact::{
    ComposeUnavailable, ContactForm, FallbackPolicy, LinkOpener, MailtoFallback, RelayClient,
};
use portfolio_contact::domain::{ContactEmail, Field};
use portfolio_contact::startup::Application;
use portfolio_contact::telemetry::{get_subscriber, init_subscriber};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockBuilder, MockServer};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub const OWNER_EMAIL: &str = "owner@portfolio.dev";

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contact(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/contact", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_test_env(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/test-env", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn contact_endpoint(&self) -> String {
        format!("{}/api/contact", &self.address)
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c.contact.owner_email = OWNER_EMAIL.to_string();
        c
    };

    let application = Application::build(configuration.clone())
        .await
        .expect("Failed to build application.");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let api_client = reqwest::Client::builder().build().unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        email_server,
        api_client,
    }
}

pub fn when_sending_an_email() -> MockBuilder {
    Mock::given(path("/emails")).and(method("POST"))
}

pub fn valid_contact_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jo",
        "email": "jo@x.com",
        "subject": "",
        "message": "hello"
    })
}

/// Remembers every link it was asked to open.
#[derive(Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, uri: &str) -> Result<(), ComposeUnavailable> {
        self.opened.lock().unwrap().push(uri.to_string());
        Ok(())
    }
}

pub struct BrokenOpener;

impl LinkOpener for BrokenOpener {
    fn open(&self, _uri: &str) -> Result<(), ComposeUnavailable> {
        Err(ComposeUnavailable(anyhow::anyhow!("no mail client installed")))
    }
}

pub fn contact_form<O: LinkOpener>(
    relay_endpoint: String,
    opener: O,
    policy: FallbackPolicy,
) -> ContactForm<MailtoFallback<O>> {
    let relay = RelayClient::new(
        relay_endpoint,
        "Portfolio Contact".to_string(),
        std::time::Duration::from_secs(5),
    );
    let fallback = MailtoFallback::new(
        ContactEmail::parse(OWNER_EMAIL.to_string()).unwrap(),
        "Portfolio Contact".to_string(),
        "https://portfolio.dev/#contact".to_string(),
        opener,
    );
    ContactForm::new(relay, fallback, policy)
}

pub fn fill_in<O: LinkOpener>(
    form: &ContactForm<MailtoFallback<O>>,
    name: &str,
    email: &str,
    message: &str,
) {
    form.edit(Field::Name, name);
    form.edit(Field::Email, email);
    form.edit(Field::Message, message);
}
