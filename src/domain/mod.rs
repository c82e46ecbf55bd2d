mod contact_email;
mod contact_fields;
mod contact_submission;
pub mod validation;

pub use contact_email::ContactEmail;
pub use contact_fields::{ContactFields, Field};
pub use contact_submission::ContactSubmission;
pub use validation::{validate, FieldError, FormErrors};
