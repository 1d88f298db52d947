use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slacker::{
    config::NotifierSettings,
    models::FrequencyPolicy,
    notification::{Notifier, SendOutcome},
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the notifier configuration file (YAML, TOML or JSON).
    #[arg(short, long, default_value = "slacker.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sends one message to every configured recipient.
    Send {
        /// The message text.
        message: String,

        /// Overrides the configured message tag.
        #[arg(short, long)]
        tag: Option<String>,

        /// Overrides the configured frequency policy
        /// (always, once_per_hour, once_per_day).
        #[arg(short, long)]
        frequency: Option<FrequencyPolicy>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Send { message, tag, frequency } => {
            send(cli.config, message, tag, frequency).await?
        }
    }

    Ok(())
}

async fn send(
    config_path: PathBuf,
    message: String,
    tag: Option<String>,
    frequency: Option<FrequencyPolicy>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(path = %config_path.display(), "Loading notifier configuration...");
    let mut builder = NotifierSettings::load(&config_path)?.into_builder();
    if let Some(tag) = tag {
        builder = builder.tag(tag);
    }
    if let Some(frequency) = frequency {
        builder = builder.frequency(frequency);
    }

    let notifier = Notifier::from_builder(builder)?;
    tracing::debug!(
        webhook = %notifier.config().webhook_url(),
        recipients = notifier.config().recipients().len(),
        record = %notifier.config().record_path().display(),
        "Notifier initialized."
    );

    match notifier.send(&message).await? {
        SendOutcome::Skipped { fingerprint } => {
            tracing::info!(%fingerprint, "Message already sent in this window.")
        }
        SendOutcome::Delivered { recipients } => {
            tracing::info!(recipients, "Message delivered.")
        }
    }

    Ok(())
}
