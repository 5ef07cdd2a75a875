use chrono::Local;
use clap::{Parser, Subcommand};
use continuum_core::{normalize_day, Config, DayKey};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "continuum", version, about = "Continuum habit tracker CLI")]
struct Cli {
    /// Treat this day (YYYY-MM-DD) as today
    #[arg(long, global = true, value_name = "DATE")]
    as_of: Option<DayKey>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitCommand,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let today = cli.as_of.unwrap_or_else(|| normalize_day(Local::now()));
    tracing::debug!(%today, "resolved today");

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, today, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
