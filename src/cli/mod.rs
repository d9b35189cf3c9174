use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "homework-bot")]
#[command(about = "Relays Practicum homework review status changes to a Telegram chat")]
#[command(version)]
pub struct Cli {
    /// Path to config file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "homework_bot.toml")]
    pub config: PathBuf,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Override the log file path from the config
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
