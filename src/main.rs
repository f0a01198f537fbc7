use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use impact::core::log::init_logging;
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Estimate the return from a few quick answers
    Quick {
        /// Number of invitations you plan to send
        #[arg(short, long, default_value_t = 0)]
        invites: u64,
        /// Hours per day you can dedicate
        #[arg(long, default_value_t = Decimal::ZERO)]
        hours: Decimal,
        /// You have a website to host offers on
        #[arg(short, long)]
        website: bool,
        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },
    /// Estimate the return described by a JSON report
    Report {
        /// Path to the report file
        path: String,
        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },
}

impl From<Commands> for impact::AppCommand {
    fn from(cmd: Commands) -> impact::AppCommand {
        match cmd {
            Commands::Quick {
                invites,
                hours,
                website,
                json,
            } => impact::AppCommand::Quick {
                num_invites: invites,
                daily_hours: hours,
                have_website: website,
                json,
            },
            Commands::Report { path, json } => impact::AppCommand::Report { path, json },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => impact::cli::setup::setup(),
        Some(cmd) => impact::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
