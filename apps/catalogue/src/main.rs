//! Tool catalogue CLI.
//!
//! The `catalogue` command browses, searches and administers the internal
//! tool catalogue.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

mod commands;
mod context;
mod logging;
mod ui;

use context::LoginRequired;

/// Exit status when the server rejected (or never had) a token
const EXIT_LOGIN_REQUIRED: u8 = 3;

#[derive(Parser)]
#[command(name = "catalogue")]
#[command(about = "Browse and search the internal tool catalogue")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalogue, optionally filtered
    List(commands::browse::ListArgs),

    /// Search the catalogue
    Search(commands::browse::SearchArgs),

    /// Show one tool
    Show {
        /// Tool id
        id: String,
    },

    /// List tags
    Tags {
        /// Show per-tag usage counts
        #[arg(long)]
        stats: bool,
    },

    /// Sign in and store an access token
    Login(commands::session::LoginArgs),

    /// Forget the stored access token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage catalogue entries (admins only)
    Admin {
        #[command(subcommand)]
        command: commands::admin::AdminCommands,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if needs_login(&e) => {
            eprintln!("{}", ui::login::render());
            ExitCode::from(EXIT_LOGIN_REQUIRED)
        }
        Err(e) => {
            eprintln!("{} {e:#}", "ERROR".red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        // Config commands work without a usable configuration
        Commands::Config { command } => {
            logging::init(cli.verbose, None);
            return commands::config::execute(command);
        }
        other => other,
    };

    let ctx = context::AppContext::load(cli.api_base.as_deref(), cli.json)?;
    logging::init(cli.verbose, Some(&ctx.settings.logging));
    tracing::debug!(api = %ctx.settings.api.base_url, "Starting");

    match command {
        Commands::List(args) => commands::browse::list(&ctx, args).await,
        Commands::Search(args) => commands::browse::search(&ctx, args).await,
        Commands::Show { id } => commands::browse::show(&ctx, &id).await,
        Commands::Tags { stats } => commands::browse::tags(&ctx, stats).await,
        Commands::Login(args) => commands::session::login(&ctx, args).await,
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Whoami => commands::session::whoami(&ctx).await,
        Commands::Admin { command } => commands::admin::execute(&ctx, command).await,
        Commands::Config { command } => commands::config::execute(command),
    }
}

/// True for a missing session or a 401 anywhere in the error chain
fn needs_login(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<LoginRequired>()
            || cause
                .downcast_ref::<catalogue_async::CatalogueError>()
                .is_some_and(catalogue_async::CatalogueError::is_unauthorized)
            || cause
                .downcast_ref::<catalogue_core::CoreError>()
                .is_some_and(catalogue_core::CoreError::is_unauthorized)
    })
}
