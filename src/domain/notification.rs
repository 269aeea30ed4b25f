use lettre::Address;

use crate::domain::{escape_html, ContactSubmission};

/// A fully composed email, ready to be handed to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub from: Address,
    pub to: Address,
    pub reply_to: Option<Address>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Everything about a notification that does not come from the visitor.
#[derive(Debug, Clone)]
pub struct NotificationTemplate {
    pub sender: Address,
    pub recipient: Address,
    pub business_name: String,
    /// Puts the submitter's address in `Reply-To`. Sender and recipient never come from the form.
    pub reply_to_submitter: bool,
}

impl NotificationTemplate {
    #[tracing::instrument(name = "Composing the contact notification", skip_all)]
    pub fn compose(&self, submission: &ContactSubmission) -> Notification {
        let ContactSubmission {
            name,
            email,
            message,
        } = submission;

        let reply_to = if self.reply_to_submitter {
            match email.as_ref().parse::<Address>() {
                Ok(address) => Some(address),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Submitter address is not a valid mailbox, leaving Reply-To unset."
                    );
                    None
                }
            }
        } else {
            None
        };

        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #1f2937; border-bottom: 2px solid #f59e0b; padding-bottom: 10px;">
    New Contact Form Submission
  </h2>
  <div style="background-color: #f9fafb; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Message:</strong></p>
    <div style="background-color: white; padding: 15px; border-radius: 4px; border-left: 4px solid #f59e0b;">
      {message_html}
    </div>
  </div>
  <p style="color: #6b7280; font-size: 14px;">
    This message was sent from the {business} contact form.
  </p>
</div>"#,
            name = name.as_html(),
            email = escape_html(email.as_ref()),
            message_html = message.with_line_breaks(),
            business = self.business_name,
        );
        // the text part and subject show the stripped text as typed
        let text = format!(
            "New Contact Form Submission\n\n\
            Name: {name}\n\
            Email: {email}\n\
            Message:\n{message}\n\n\
            This message was sent from the {business} contact form.",
            business = self.business_name,
        );

        Notification {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            reply_to,
            subject: format!("New Contact Form Submission from {}", name),
            html,
            text,
        }
    }
}
