use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::SanitizedText;

/// `local@domain.tld`, where no part contains whitespace or another `@`.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email shape pattern"));

/// A sanitized email address with a plausible shape. Nothing beyond the shape is verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Checks the shape of an address that has already been sanitized.
    pub fn parse(email: SanitizedText) -> Result<ContactEmail, String> {
        if EMAIL_SHAPE.is_match(email.as_ref()) {
            Ok(Self(email.as_ref().to_string()))
        } else {
            Err(format!("{} is not a valid contact email.", email))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
