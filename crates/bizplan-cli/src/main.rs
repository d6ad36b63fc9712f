mod clock;
mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, project::ProjectSubcommand, promo::PromoSubcommand,
    wizard::WizardSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bizplan",
    about = "Business-plan wizard, launch promotion pricing and demo evaluation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .bizplan/)
    #[arg(long, global = true, env = "BIZPLAN_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize bizplan in the current directory
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Launch promotion: phase, countdown, plan prices
    Promo {
        #[command(subcommand)]
        subcommand: PromoSubcommand,
    },

    /// Create or show the current business-plan project
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// Drive the six-step business-plan wizard
    Wizard {
        #[command(subcommand)]
        subcommand: WizardSubcommand,
    },

    /// Score answers with the demo evaluation heuristic
    Evaluate {
        /// YAML or JSON file mapping question ids to answers
        #[arg(long)]
        file: Option<PathBuf>,

        /// Inline answer as question_id=text (repeatable)
        #[arg(long = "answer", short = 'a', value_name = "ID=TEXT")]
        answers: Vec<String>,
    },

    /// Pre-register for a plan at the current promotion price
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        organization: Option<String>,
        /// plus, pro or premium
        #[arg(long)]
        plan: String,
        /// Evaluate the price at this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Pre-registration statistics
    Stats,

    /// Show or validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Run the mock REST backend
    Serve {
        /// Port to listen on (default: server.port from config)
        #[arg(long)]
        port: Option<u16>,

        /// Open the promotion endpoint in a browser
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Promo { subcommand } => cmd::promo::run(&root, subcommand, cli.json),
        Commands::Project { subcommand } => cmd::project::run(&root, subcommand, cli.json),
        Commands::Wizard { subcommand } => cmd::wizard::run(&root, subcommand, cli.json),
        Commands::Evaluate { file, answers } => {
            cmd::evaluate::run(file.as_deref(), &answers, cli.json)
        }
        Commands::Register {
            name,
            email,
            phone,
            organization,
            plan,
            at,
        } => cmd::register::run(
            &root,
            cmd::register::RegisterArgs {
                name,
                email,
                phone,
                organization,
                plan,
                at,
            },
            cli.json,
        ),
        Commands::Stats => cmd::register::stats(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port, open } => cmd::serve::run(&root, port, open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
