use embroidery_site::configuration::get_configuration;
use embroidery_site::startup::Application;
use embroidery_site::telemetry::{get_tracing_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_tracing_subscriber("embroidery-site", "info", std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration).await?;
    tracing::info!(port = application.port(), "Serving the contact and catalog API");
    application.run_until_stopped().await?;
    Ok(())
}
