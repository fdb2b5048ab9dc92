use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod session;

use commands::{
    AuthCommand, CalendarCommand, ConfigCommand, DiaryCommand, DogCommand, HealthCommand,
    HomeCommand, LogCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "paw")]
#[command(version)]
#[command(about = "A health log for your dogs", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign up, log in and out
    Auth(AuthCommand),

    /// Manage dog profiles
    Dog(DogCommand),

    /// Record and list weight and food logs
    Log(LogCommand),

    /// Write and read the diary
    Diary(DiaryCommand),

    /// Summary of the selected dog
    Home(HomeCommand),

    /// Weight and food trend charts
    Health(HealthCommand),

    /// This month's logging calendar
    Calendar(CalendarCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for init command
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create runtime: {}", e))?;
    rt.block_on(execute_command(&cli.command, &config, cli_config_path))
}

async fn execute_command(
    command: &Option<Commands>,
    config: &Config,
    cli_config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Some(Commands::Auth(cmd)) => cmd.run(config).await?,
        Some(Commands::Dog(cmd)) => cmd.run(config).await?,
        Some(Commands::Log(cmd)) => cmd.run(config).await?,
        Some(Commands::Diary(cmd)) => cmd.run(config).await?,
        Some(Commands::Home(cmd)) => cmd.run(config).await?,
        Some(Commands::Health(cmd)) => cmd.run(config).await?,
        Some(Commands::Calendar(cmd)) => cmd.run(config).await?,
        Some(Commands::Config(cmd)) => cmd.run(config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
