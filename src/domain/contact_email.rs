use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(pub(super) String);

impl ContactEmail {
    /// Shape check only: something before the `@`, a dot somewhere after it,
    /// and no whitespace. No lookup is performed.
    pub fn is_well_formed(s: &str) -> bool {
        EMAIL_SHAPE.is_match(s)
    }

    pub fn parse(s: String) -> Result<ContactEmail, String> {
        if Self::is_well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email.", s))
        }
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
