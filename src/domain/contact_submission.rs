use super::validation::{validate, FormErrors};
use super::{ContactEmail, ContactFields};

/// A contact message that passed validation. The only way to build one is
/// through `TryFrom<ContactFields>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: ContactEmail,
    subject: Option<String>,
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First word of the sender's name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }

    pub fn email(&self) -> &ContactEmail {
        &self.email
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn subject_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.subject().unwrap_or(default)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<ContactFields> for ContactSubmission {
    type Error = FormErrors;

    fn try_from(value: ContactFields) -> Result<Self, Self::Error> {
        let errors = validate(&value);
        if !errors.is_empty() {
            return Err(errors);
        }
        let email = ContactEmail(value.email);
        let subject = Some(value.subject)
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_owned());
        Ok(Self {
            name: value.name.trim().to_owned(),
            email,
            subject,
            message: value.message,
        })
    }
}
