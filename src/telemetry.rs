use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Composes multiple layers into a `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `env_filter`. The sink is generic so tests can swap
/// `std::io::stdout` for `std::io::sink`.
pub fn get_tracing_subscriber<Sink>(
    name: &str,
    env_filter: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // higher-ranked trait bound: Sink implements MakeWriter for every lifetime 'a
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Registers a subscriber as the global default to process span data.
///
/// Must only be called once per process.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // redirect `log` records (actix, lettre, rustls) into the tracing subscriber
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
