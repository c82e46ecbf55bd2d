use std::collections::BTreeMap;

use super::{ContactEmail, ContactFields, Field};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const MESSAGE_REQUIRED: &str = "Message is required";
const SUBJECT_REQUIRED: &str = "Subject is required";

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Left blank, or only whitespace.
    Missing,
    /// Present but not of the expected shape. Only the email has one.
    Malformed,
}

impl FieldError {
    /// The inline message shown under `field`.
    pub fn message(&self, field: Field) -> &'static str {
        match (self, field) {
            (FieldError::Malformed, _) => EMAIL_INVALID,
            (FieldError::Missing, Field::Name) => NAME_REQUIRED,
            (FieldError::Missing, Field::Email) => EMAIL_REQUIRED,
            (FieldError::Missing, Field::Message) => MESSAGE_REQUIRED,
            (FieldError::Missing, Field::Subject) => SUBJECT_REQUIRED,
        }
    }
}

/// Inline errors keyed by the field they belong to. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, FieldError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn kind(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.kind(field).map(|kind| kind.message(field))
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0
            .iter()
            .map(|(field, kind)| (*field, kind.message(*field)))
    }

    /// Drops the error shown for `field`, leaving every other field alone.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// True when at least one required field was left blank.
    pub fn has_missing_fields(&self) -> bool {
        self.0.values().any(|kind| *kind == FieldError::Missing)
    }

    fn insert(&mut self, field: Field, kind: FieldError) {
        self.0.insert(field, kind);
    }
}

/// Serializes as `{"<field>": "<message>"}`.
impl serde::Serialize for FormErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn validate(fields: &ContactFields) -> FormErrors {
    let mut errors = FormErrors::default();

    if is_blank(&fields.name) {
        errors.insert(Field::Name, FieldError::Missing);
    }

    if is_blank(&fields.email) {
        errors.insert(Field::Email, FieldError::Missing);
    } else if !ContactEmail::is_well_formed(&fields.email) {
        errors.insert(Field::Email, FieldError::Malformed);
    }

    if is_blank(&fields.message) {
        errors.insert(Field::Message, FieldError::Missing);
    }

    errors
}
