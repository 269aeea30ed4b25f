pub mod catalog;
pub mod configuration;
pub mod contact_client;
pub mod domain;
pub mod email_client;
mod error_handling;
pub mod routes;
pub mod startup;
pub mod telemetry;

pub use error_handling::ErrorBody;
