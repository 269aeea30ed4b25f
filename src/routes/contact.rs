use std::fmt::{Debug, Formatter};

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use anyhow::Context;

use crate::domain::{ContactSubmission, NotificationTemplate, SubmissionError};
use crate::email_client::MailTransport;
use crate::error_handling::{error_chain_fmt, json_error};

/// The JSON body posted by the contact form. Fields are optional so that a missing field is a
/// validation failure rather than a decoding failure.
#[derive(serde::Deserialize, Debug, Default)]
pub struct ContactFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct SuccessBody {
    pub message: String,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] SubmissionError),
    #[error("Failed to send email")]
    UnexpectedError(#[source] anyhow::Error),
}

impl Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        // `Display` never includes the cause, so transport details stay in the logs
        json_error(self.status_code(), self.to_string())
    }
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(body, template, transport),
    fields(
        submitter_email = tracing::field::Empty,
        submitter_name = tracing::field::Empty
    )
)]
pub async fn submit_contact_form(
    body: web::Json<ContactFormData>,
    template: web::Data<NotificationTemplate>,
    transport: web::Data<dyn MailTransport>,
) -> Result<HttpResponse, ContactError> {
    let submission: ContactSubmission = body.into_inner().try_into()?;
    let span = tracing::Span::current();
    span.record("submitter_email", tracing::field::display(&submission.email));
    span.record("submitter_name", tracing::field::display(&submission.name));

    let notification = template.compose(&submission);
    transport
        .send_mail(&notification)
        .await
        .context("Failed to deliver the contact notification")
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to send email");
            ContactError::UnexpectedError(e)
        })?;

    Ok(HttpResponse::Ok().json(SuccessBody {
        message: "Email sent successfully".into(),
    }))
}

/// Answers any method other than POST on the contact endpoint.
pub async fn contact_method_not_allowed() -> HttpResponse {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Maps an undecodable body to the same generic failure a delivery error produces.
pub fn contact_payload_error(
    error: actix_web::error::JsonPayloadError,
    _request: &HttpRequest,
) -> actix_web::Error {
    let error = anyhow::anyhow!("{}", error).context("Failed to decode the contact form body");
    tracing::error!(error.cause_chain = ?error, "Rejected a malformed contact form submission");
    ContactError::UnexpectedError(error).into()
}
