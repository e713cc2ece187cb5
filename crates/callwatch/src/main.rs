//! Callwatch - Microsoft Teams call presence over MQTT
//!
//! Binary name: `callwatch`

use std::process;

use anyhow::Context;
use callwatch_core::{
    broker::{MqttBroker, PublisherBridge, Topics},
    load_config, Pipeline, Settings, ShutdownListener, WatchOptions,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {e}");
            }
            #[allow(clippy::exit)]
            process::exit(e.exit_code());
        }
    };

    if let Err(err) = run(settings).await {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err:#}");
        }

        let code = err
            .downcast_ref::<callwatch_core::Error>()
            .map_or(1, callwatch_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let listener = ShutdownListener::install().context("Failed to setup signal handlers")?;

    tracing::info!(
        log_file = %settings.log_file.display(),
        prefix = %settings.topic_prefix,
        "starting callwatch"
    );

    let topics = Topics::new(&settings.topic_prefix);
    let (broker, connected) = MqttBroker::connect(&settings.broker, &topics.last_will());
    let bridge = PublisherBridge::new(broker, topics);

    Pipeline::new(WatchOptions::from(&settings), bridge)
        .run_until(connected, async {
            let signal = listener.recv().await;
            tracing::info!(?signal, "received shutdown signal");
        })
        .await?;

    Ok(())
}
