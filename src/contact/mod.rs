//! The contact-submission pipeline: validation, relay delivery, mail
//! composer fallback and the status shown to the visitor.
mod fallback;
mod orchestrator;
mod primary;
mod status;

pub use fallback::{
    CommandOpener, ComposeUnavailable, FallbackChannel, LinkOpener, MailtoFallback, PrintOpener,
};
pub use orchestrator::{ContactForm, FallbackPolicy};
pub use primary::{DeliveryError, DeliveryId, RelayClient};
pub use status::{Banner, BannerKind, SubmissionStatus};
