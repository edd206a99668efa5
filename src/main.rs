use anyhow::Context;
use clap::Parser;
use employee_tracker::core::ConfigProvider;
use employee_tracker::utils::{logger, validation::Validate};
use employee_tracker::{CliConfig, Navigator, SqliteDatabase, TerminalPresenter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Check the --config path and that the file is valid TOML");
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Without a reachable database there is nothing to navigate.
    let db = SqliteDatabase::from_config(&config)
        .with_context(|| format!("cannot open database at {}", config.database_path()))?;
    tracing::info!("Connected to {}", config.database_path());

    let navigator = Navigator::new(db, TerminalPresenter::stdin());
    navigator.run().await?;

    Ok(())
}
