use std::process::{Command, Stdio};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{ContactEmail, ContactSubmission};

#[derive(thiserror::Error, Debug)]
#[error("The mail composer could not be opened")]
pub struct ComposeUnavailable(#[source] pub anyhow::Error);

/// Second way of getting a message out once the relay failed. Opening a
/// composer is only ever "attempted": nothing reports whether the user sent
/// the email.
pub trait FallbackChannel: Send + Sync {
    fn compose(&self, submission: &ContactSubmission) -> Result<(), ComposeUnavailable>;
}

/// The host environment's way of following a link.
pub trait LinkOpener: Send + Sync {
    fn open(&self, uri: &str) -> Result<(), ComposeUnavailable>;
}

/// Hands the link to an external program such as `xdg-open` or `open`.
pub struct CommandOpener {
    program: String,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl LinkOpener for CommandOpener {
    /// Waits for the program to exit. Launchers like `xdg-open` return as soon
    /// as the mail client is up, and a non-zero exit means no handler took it.
    fn open(&self, uri: &str) -> Result<(), ComposeUnavailable> {
        let status = Command::new(&self.program)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("Failed to launch `{}`", self.program))
            .map_err(ComposeUnavailable)?;
        if !status.success() {
            return Err(ComposeUnavailable(anyhow::anyhow!(
                "`{}` exited with {}",
                self.program,
                status
            )));
        }
        Ok(())
    }
}

/// Prints the link for the user to follow by hand.
pub struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open(&self, uri: &str) -> Result<(), ComposeUnavailable> {
        println!("{}", uri);
        Ok(())
    }
}

pub struct MailtoFallback<O> {
    recipient: ContactEmail,
    default_subject: String,
    page_url: String,
    opener: O,
}

impl<O: LinkOpener> MailtoFallback<O> {
    pub fn new(
        recipient: ContactEmail,
        default_subject: String,
        page_url: String,
        opener: O,
    ) -> Self {
        Self {
            recipient,
            default_subject,
            page_url,
            opener,
        }
    }

    pub fn mailto_link(&self, submission: &ContactSubmission, sent_at: DateTime<Utc>) -> String {
        let subject = submission.subject_or(&self.default_subject);
        let body = format!(
            "Name: {}\nEmail: {}\nSubject: {}\nSent: {}\nPage: {}\n\nMessage:\n{}",
            submission.name(),
            submission.email(),
            subject,
            sent_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.page_url,
            submission.message(),
        );
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(subject),
            urlencoding::encode(&body)
        )
    }
}

impl<O: LinkOpener> FallbackChannel for MailtoFallback<O> {
    #[tracing::instrument(
        name = "Open a pre-filled mail composer",
        skip_all,
        fields(recipient = %self.recipient)
    )]
    fn compose(&self, submission: &ContactSubmission) -> Result<(), ComposeUnavailable> {
        let link = self.mailto_link(submission, Utc::now());
        self.opener.open(&link)
    }
}
