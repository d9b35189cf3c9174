use homework_bot::api::practicum::PracticumClient;
use homework_bot::cli::Cli;
use homework_bot::config::{AppConfig, Credentials};
use homework_bot::logging;
use homework_bot::notification::telegram::TelegramNotifier;
use homework_bot::poller::Poller;

use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may come from the real environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(path) = cli.log_file {
        config.logging.file = path;
    }

    let guard = logging::init(&config.logging)?;

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            // process::exit skips destructors, so flush the file writer first.
            drop(guard);
            std::process::exit(1);
        }
    };

    let api = PracticumClient::new(config.api.endpoint.clone(), credentials.practicum_token);
    info!("homework bot started, endpoint {}", api.endpoint());

    let notifier = TelegramNotifier::new(credentials.telegram_token, credentials.telegram_chat_id)
        .with_api_base(config.telegram.api_base.clone());
    let mut poller = Poller::new(api, notifier, config.retry_period());
    info!("retry period {}s", poller.retry_period().as_secs());

    if cli.once {
        let outcome = poller.run_cycle().await;
        info!(?outcome, "single cycle finished");
        return Ok(());
    }

    tokio::select! {
        _ = poller.run() => {}
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("shutting down");
        }
    }

    Ok(())
}
