use anyhow::Context;
use clap::Parser;
use portfolio_contact::configuration::get_configuration;
use portfolio_contact::contact::{
    CommandOpener, ContactForm, LinkOpener, MailtoFallback, PrintOpener, RelayClient,
    SubmissionStatus,
};
use portfolio_contact::domain::Field;
use portfolio_contact::telemetry::{get_subscriber, init_subscriber};

/// Send a message through the portfolio contact form from a terminal.
#[derive(Parser)]
#[command(name = "send_contact")]
struct Cli {
    /// Your name
    #[arg(long, default_value = "")]
    name: String,

    /// Your email address
    #[arg(long, default_value = "")]
    email: String,

    /// What the message is about
    #[arg(long, default_value = "")]
    subject: String,

    /// The message itself
    #[arg(long, default_value = "")]
    message: String,

    /// Relay endpoint (overrides `contact.relay_url`)
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the fallback `mailto:` link instead of opening a mail client
    #[arg(long)]
    print_link: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = get_subscriber("send_contact".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration")?;
    let contact = configuration.contact;
    let owner = contact.owner().map_err(|e| anyhow::anyhow!(e))?;
    let relay = match &cli.endpoint {
        Some(endpoint) => RelayClient::new(
            endpoint.clone(),
            contact.default_subject.clone(),
            contact.timeout(),
        ),
        None => contact.relay_client(),
    };

    let status = if cli.print_link {
        let fallback = MailtoFallback::new(
            owner.clone(),
            contact.default_subject.clone(),
            contact.page_url.clone(),
            PrintOpener,
        );
        let form = ContactForm::new(relay, fallback, contact.fallback_policy);
        submit(&cli, form, owner.as_ref()).await
    } else {
        let fallback = MailtoFallback::new(
            owner.clone(),
            contact.default_subject.clone(),
            contact.page_url.clone(),
            CommandOpener::new(contact.opener_program.clone()),
        );
        let form = ContactForm::new(relay, fallback, contact.fallback_policy);
        submit(&cli, form, owner.as_ref()).await
    };

    if status != SubmissionStatus::Success {
        std::process::exit(1);
    }
    Ok(())
}

async fn submit<O: LinkOpener>(
    cli: &Cli,
    form: ContactForm<MailtoFallback<O>>,
    owner: &str,
) -> SubmissionStatus {
    form.edit(Field::Name, cli.name.as_str());
    form.edit(Field::Email, cli.email.as_str());
    form.edit(Field::Subject, cli.subject.as_str());
    form.edit(Field::Message, cli.message.as_str());

    let status = form.submit().await;
    let errors = form.errors();
    for (field, message) in errors.iter() {
        eprintln!("{}: {}", field, message);
    }
    if let Some(banner) = status.banner(owner) {
        println!("{}", banner);
    }
    status
}
