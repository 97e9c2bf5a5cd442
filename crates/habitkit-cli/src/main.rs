use std::path::PathBuf;

use clap::{Parser, Subcommand};
use habitkit_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitkit", version, about = "Habitkit CLI")]
struct Cli {
    /// Snapshot file to read (overrides data.snapshot_path)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streak and completion statistics
    Stats(commands::stats::StatsArgs),
    /// Weekly/monthly completion series for one habit
    Buckets(commands::buckets::BucketsArgs),
    /// Habits due on a date
    Today(commands::today::TodayArgs),
    /// Due dates for one habit
    Due(commands::due::DueArgs),
    /// Hour-of-day completion profile
    Profile(commands::profile::ProfileArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("HABITKIT_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let ctx = commands::Context::new(config, cli.snapshot);
    let result = match cli.command {
        Commands::Stats(args) => commands::stats::run(&ctx, args),
        Commands::Buckets(args) => commands::buckets::run(&ctx, args),
        Commands::Today(args) => commands::today::run(&ctx, args),
        Commands::Due(args) => commands::due::run(&ctx, args),
        Commands::Profile(args) => commands::profile::run(&ctx, args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
