//! Submits one contact form through a running site, the way the browser form does.

use clap::Parser;

use embroidery_site::contact_client::{
    ContactClient, ContactFields, ContactForm, FormStatus, Outcome,
};
use embroidery_site::telemetry::{get_tracing_subscriber, init_subscriber};

#[derive(Parser, Debug)]
#[command(name = "contact-form", about = "Send a message through the site's contact form")]
struct Args {
    /// Base URL of the site, e.g. http://127.0.0.1:8000
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    endpoint: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
    /// Seconds to wait for the site to answer.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_tracing_subscriber("contact-form", "warn", std::io::stderr);
    init_subscriber(subscriber);

    let args = Args::parse();
    let client = ContactClient::new(&args.endpoint, std::time::Duration::from_secs(args.timeout))?;
    let mut form = ContactForm::new(ContactFields {
        name: args.name,
        email: args.email,
        message: args.message,
    });

    let mut status = form.subscribe();
    let progress = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            if *status.borrow_and_update() == FormStatus::Submitting {
                println!("Sending...");
            }
        }
    });

    let settled = form.submit(&client).await;
    drop(form);
    progress.await?;

    match settled {
        FormStatus::Settled {
            outcome: Outcome::Success,
            message,
        } => {
            println!("{}", message);
            Ok(())
        }
        FormStatus::Settled { message, .. } => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
        FormStatus::Idle | FormStatus::Submitting => unreachable!("submit always settles"),
    }
}
