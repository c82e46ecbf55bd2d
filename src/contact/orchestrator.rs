use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{ContactFields, ContactSubmission, Field, FormErrors};

use super::{FallbackChannel, RelayClient, SubmissionStatus};

/// What a relay failure settles into once the fallback composer was opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Opening the composer is not a delivery: show the error banner.
    #[default]
    ReportError,
    /// Treat an opened composer as sent.
    Optimistic,
}

#[derive(Default)]
struct FormState {
    fields: ContactFields,
    errors: FormErrors,
    status: SubmissionStatus,
}

/// A contact form instance: the typed fields, their inline errors and the
/// submission status, plus the two channels a valid submission goes through.
pub struct ContactForm<F> {
    state: Mutex<FormState>,
    primary: RelayClient,
    fallback: F,
    policy: FallbackPolicy,
}

impl<F: FallbackChannel> ContactForm<F> {
    pub fn new(primary: RelayClient, fallback: F, policy: FallbackPolicy) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            primary,
            fallback,
            policy,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state().status
    }

    pub fn fields(&self) -> ContactFields {
        self.state().fields.clone()
    }

    pub fn errors(&self) -> FormErrors {
        self.state().errors.clone()
    }

    /// Records a keystroke. The edited field's error goes away immediately and
    /// a resting status returns to idle.
    pub fn edit(&self, field: Field, value: impl Into<String>) {
        let mut state = self.state();
        state.fields.set(field, value.into());
        state.errors.clear(field);
        if state.status.is_resting() {
            state.status = SubmissionStatus::Idle;
        }
    }

    pub fn reset(&self) {
        let mut state = self.state();
        if state.status.is_pending() {
            return;
        }
        *state = FormState::default();
    }

    #[tracing::instrument(
        name = "Submit the contact form",
        skip(self),
        fields(status = tracing::field::Empty)
    )]
    pub async fn submit(&self) -> SubmissionStatus {
        let submission = {
            let mut state = self.state();
            if state.status.is_pending() {
                tracing::warn!("A submission is already in flight. Ignoring.");
                return SubmissionStatus::Pending;
            }
            match ContactSubmission::try_from(state.fields.clone()) {
                Ok(submission) => {
                    state.errors = FormErrors::default();
                    state.status = SubmissionStatus::Pending;
                    submission
                }
                Err(errors) => {
                    tracing::info!(errors = %errors, "Contact form has invalid fields");
                    state.errors = errors;
                    return state.status;
                }
            }
        };

        let status = match self.primary.send(&submission).await {
            Ok(delivery_id) => {
                tracing::info!(delivery_id = %delivery_id, "Contact message delivered");
                SubmissionStatus::Success
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Contact submission failed. Falling back to the mail composer.",
                );
                self.settle_with_fallback(&submission)
            }
        };

        let mut state = self.state();
        state.status = status;
        if status == SubmissionStatus::Success {
            state.fields.clear();
        }
        tracing::Span::current().record("status", tracing::field::display(status));
        status
    }

    fn settle_with_fallback(&self, submission: &ContactSubmission) -> SubmissionStatus {
        match self.fallback.compose(submission) {
            Ok(()) => match self.policy {
                FallbackPolicy::ReportError => SubmissionStatus::Error,
                FallbackPolicy::Optimistic => SubmissionStatus::Success,
            },
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "No fallback left for the contact submission",
                );
                SubmissionStatus::Error
            }
        }
    }
}
