mod contact_email;
mod contact_submission;
mod notification;
mod sanitized_text;

pub use contact_email::ContactEmail;
pub use contact_submission::{ContactSubmission, SubmissionError};
pub use notification::{Notification, NotificationTemplate};
pub use sanitized_text::{escape_html, strip_markup, SanitizedText};
