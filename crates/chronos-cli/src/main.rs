mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{activity::ActivitySubcommand, config::ConfigSubcommand, template::TemplateSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chronos",
    about = "Weekly activity planner: recurring time blocks with live status",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .chronos/)
    #[arg(long, global = true, env = "CHRONOS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize chronos in the current directory
    Init,

    /// Serve the HTTP API
    Serve {
        /// Port to listen on (default: from config)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: from config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show or validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Manage activities
    Activity {
        #[command(subcommand)]
        subcommand: ActivitySubcommand,
    },

    /// Manage templates
    Template {
        #[command(subcommand)]
        subcommand: TemplateSubcommand,
    },

    /// Show one day's activities with their current status
    Day {
        /// Day to show: 0-6, or a day name (default: today)
        #[arg(long)]
        day: Option<String>,

        /// Evaluate status at this time (HH:mm, default: now)
        #[arg(long)]
        at: Option<String>,

        /// Treat this day as today when evaluating status
        #[arg(long)]
        today: Option<String>,

        /// Show the day after the selected one
        #[arg(long, conflicts_with = "prev")]
        next: bool,

        /// Show the day before the selected one
        #[arg(long)]
        prev: bool,
    },

    /// Live board for one day, refreshed on every clock tick
    Watch {
        /// Day to show (default: today)
        #[arg(long)]
        day: Option<String>,

        /// Render once and exit
        #[arg(long)]
        once: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } | Commands::Watch { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Serve { port, bind } => cmd::serve::run(&root, port, bind.as_deref()),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Activity { subcommand } => cmd::activity::run(&root, subcommand, cli.json),
        Commands::Template { subcommand } => cmd::template::run(&root, subcommand, cli.json),
        Commands::Day {
            day,
            at,
            today,
            next,
            prev,
        } => cmd::day::run(
            &root,
            cmd::day::DayArgs {
                day,
                at,
                today,
                next,
                prev,
            },
            cli.json,
        ),
        Commands::Watch { day, once } => cmd::watch::run(&root, day.as_deref(), once),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
