use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::catalog::Catalog;
use crate::configuration::Settings;
use crate::domain::NotificationTemplate;
use crate::email_client::{MailTransport, SmtpMailer};
use crate::routes::{
    category_query_error, contact_method_not_allowed, contact_payload_error,
    featured_categories, get_category, health_check, list_categories, submit_contact_form,
};

/// A bound, not yet running, HTTP server.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Builds the application with the SMTP relay described by `configuration`.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let transport = SmtpMailer::from_settings(&configuration.email_client)?;
        Self::build_with_transport(configuration, Arc::new(transport)).await
    }

    /// Builds the application around an arbitrary mail transport.
    pub async fn build_with_transport(
        configuration: Settings,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self, anyhow::Error> {
        // misconfigured addresses stop the process here instead of failing each request
        let template = NotificationTemplate {
            sender: configuration
                .email_client
                .sender()
                .map_err(anyhow::Error::msg)?,
            recipient: configuration
                .email_client
                .recipient()
                .map_err(anyhow::Error::msg)?,
            business_name: configuration.application.business_name.clone(),
            reply_to_submitter: configuration.email_client.reply_to_submitter,
        };
        let catalog = Catalog::bundled().context("Failed to load the product catalog")?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        // port 0 asks the OS for a free port; read back the one we got
        let port = listener.local_addr()?.port();
        let server = run(listener, template, transport, catalog)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Runs until stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    template: NotificationTemplate,
    transport: Arc<dyn MailTransport>,
    catalog: Catalog,
) -> Result<Server, std::io::Error> {
    // wrap shared state in web::Data (an Arc) so every worker gets a handle to the same value
    let template = web::Data::new(template);
    let transport: web::Data<dyn MailTransport> = web::Data::from(transport);
    let catalog = web::Data::new(catalog);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/api/contact")
                    .app_data(web::JsonConfig::default().error_handler(contact_payload_error))
                    .route(web::post().to(submit_contact_form))
                    .default_service(web::to(contact_method_not_allowed)),
            )
            .service(
                web::scope("/api/categories")
                    .app_data(web::QueryConfig::default().error_handler(category_query_error))
                    .route("", web::get().to(list_categories))
                    // registered before `{slug}` so it is not read as a slug
                    .route("/featured", web::get().to(featured_categories))
                    .route("/{slug}", web::get().to(get_category)),
            )
            .app_data(template.clone())
            .app_data(transport.clone())
            .app_data(catalog.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
