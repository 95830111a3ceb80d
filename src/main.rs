use clap::Parser;
use fundwatch::cli::{self, Cli, Command};
use fundwatch::config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("fundwatch starting");

    let result = match cli.command.unwrap_or_default() {
        Command::Run => cli::run::execute(config).await,
        Command::Report { send } => cli::report::execute(config, send).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }

    info!("fundwatch stopped");
}
