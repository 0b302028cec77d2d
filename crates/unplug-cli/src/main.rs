use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "unplug", version, about = "Unplug CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Personality quiz
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Chat with the detox assistant
    Chat {
        /// Personality label override (defaults to the stored result)
        #[arg(long)]
        personality: Option<String>,
    },
    /// Foreground usage monitor
    Monitor {
        #[command(subcommand)]
        action: commands::monitor::MonitorAction,
    },
    /// Screen-time statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Chat { personality } => commands::chat::run(personality),
        Commands::Monitor { action } => commands::monitor::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
