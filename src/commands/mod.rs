//! CLI command definitions and dispatch.

pub mod auth;
pub mod nav;

use clap::{Parser, Subcommand};

use timegrid_core::error::AppError;

use crate::context::AppContext;

/// TimeGrid — scheduling client
#[derive(Debug, Parser)]
#[command(name = "timegrid", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (selects config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login(auth::LoginArgs),
    /// Register a new organization
    Register(auth::RegisterArgs),
    /// Sign in as the shared demo user
    Demo,
    /// Sign out and clear the stored session
    Logout,
    /// Show the current user
    Whoami,
    /// Exchange the current token for a fresh one
    Refresh,
    /// List the application routes
    Routes,
    /// Evaluate a navigation to the given path
    Open(nav::OpenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, ctx: &AppContext) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, ctx).await,
            Commands::Register(args) => auth::register(args, ctx).await,
            Commands::Demo => auth::demo(ctx).await,
            Commands::Logout => auth::logout(ctx).await,
            Commands::Whoami => auth::whoami(ctx).await,
            Commands::Refresh => auth::refresh(ctx).await,
            Commands::Routes => nav::routes(ctx),
            Commands::Open(args) => nav::open(args, ctx),
        }
    }
}
