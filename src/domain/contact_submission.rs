use crate::domain::{ContactEmail, SanitizedText};
use crate::routes::ContactFormData;

/// A contact form submission that passed every check and may be delivered.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: SanitizedText,
    pub email: ContactEmail,
    pub message: SanitizedText,
}

/// Why a submission was turned away. The `Display` text is what the visitor is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = SubmissionError;

    fn try_from(form: ContactFormData) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(message)) = (
            non_empty(form.name),
            non_empty(form.email),
            non_empty(form.message),
        ) else {
            return Err(SubmissionError::MissingFields);
        };

        // every field is sanitized before any of them is judged; the email shape is checked on
        // the sanitized value
        let sanitized = (
            SanitizedText::parse(&name),
            SanitizedText::parse(&email),
            SanitizedText::parse(&message),
        );
        let (Ok(name), Ok(email), Ok(message)) = sanitized else {
            return Err(SubmissionError::MissingFields);
        };
        let email = ContactEmail::parse(email).map_err(|_| SubmissionError::InvalidEmail)?;

        Ok(ContactSubmission {
            name,
            email,
            message,
        })
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
