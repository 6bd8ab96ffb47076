mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, sidebar::SidebarOp};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "forge",
    about = "Forge lifecycle phases, sidebar collapse state, and slugs",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .forge/ or .git/)
    #[arg(long, global = true, env = "FORGE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a forge window as pre, during, or post
    Phase {
        /// First day of the window (YYYY-MM-DD); omit for an unscheduled forge
        #[arg(long)]
        start: Option<String>,

        /// Last day of the window (YYYY-MM-DD); omit for an open-ended forge
        #[arg(long)]
        end: Option<String>,

        /// Instant to classify against (default: local wall clock)
        #[arg(long)]
        now: Option<String>,
    },

    /// Generate or validate a slug
    Slug {
        /// Text to slugify (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Validate TEXT as a slug instead of generating one
        #[arg(long, conflicts_with = "taken")]
        check: bool,

        /// Slug already in use; a numeric suffix is added to avoid it
        #[arg(long, value_name = "SLUG")]
        taken: Vec<String>,
    },

    /// Mount a sidebar session and replay collapse operations against it
    Sidebar {
        /// Viewport width in CSS pixels (omit when no display is available)
        #[arg(long)]
        width: Option<u32>,

        /// Override the configured collapse breakpoint
        #[arg(long)]
        breakpoint: Option<u32>,

        /// Operations to apply, in order
        #[arg(value_enum)]
        ops: Vec<SidebarOp>,
    },

    /// Inspect or create the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Phase { start, end, now } => {
            cmd::phase::run(start.as_deref(), end.as_deref(), now.as_deref(), cli.json)
        }
        Commands::Slug { text, check, taken } => cmd::slug::run(&text, check, &taken, cli.json),
        Commands::Sidebar {
            width,
            breakpoint,
            ops,
        } => cmd::sidebar::run(&root, width, breakpoint, &ops, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
