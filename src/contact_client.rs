use reqwest::{Client, StatusCode, Url};
use tokio::sync::watch;

use crate::error_handling::ErrorBody;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Posts contact form submissions to the site's API.
pub struct ContactClient {
    http_client: Client,
    endpoint: Url,
}

impl ContactClient {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self, anyhow::Error> {
        let endpoint = Url::parse(base_url)?.join("/api/contact")?;
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }

    #[tracing::instrument(name = "Posting a contact form", skip(self, fields))]
    pub async fn post(&self, fields: &ContactFields) -> Result<reqwest::Response, reqwest::Error> {
        self.http_client
            .post(self.endpoint.clone())
            .json(fields)
            .send()
            .await
    }
}

/// What the visitor typed.
#[derive(serde::Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Settled { outcome: Outcome, message: String },
}

/// Field values plus the status shown next to the submit button.
pub struct ContactForm {
    fields: ContactFields,
    status: watch::Sender<FormStatus>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(ContactFields::default())
    }
}

impl ContactForm {
    pub fn new(fields: ContactFields) -> Self {
        let (status, _) = watch::channel(FormStatus::Idle);
        Self { fields, status }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ContactFields {
        &mut self.fields
    }

    pub fn status(&self) -> FormStatus {
        self.status.borrow().clone()
    }

    /// Observes every status change, including the transient `Submitting`.
    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    /// Sends the current fields once and settles on the outcome. Fields are cleared only on
    /// success so the visitor can fix and resubmit otherwise.
    pub async fn submit(&mut self, client: &ContactClient) -> FormStatus {
        self.status.send_replace(FormStatus::Submitting);

        let settled = match client.post(&self.fields).await {
            Ok(response) if response.status() == StatusCode::OK => {
                self.fields = ContactFields::default();
                FormStatus::Settled {
                    outcome: Outcome::Success,
                    message: SUCCESS_MESSAGE.into(),
                }
            }
            Ok(response) => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .map(|body| body.error)
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.into());
                FormStatus::Settled {
                    outcome: Outcome::Error,
                    message,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "The contact form request did not get a response");
                FormStatus::Settled {
                    outcome: Outcome::Error,
                    message: FALLBACK_ERROR_MESSAGE.into(),
                }
            }
        };

        self.status.send_replace(settled.clone());
        settled
    }
}
