//! Operator command-line interface for the car recommendation service.
//!
//! Every subcommand prints a single JSON payload describing the outcome
//! (except `doctor`, which has a human-readable mode) and maps failures to
//! distinct exit codes so shell scripts can branch on what went wrong.

pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "showroom",
    about = "Operate the car recommendation chatbot service",
    long_about = "Operate the car recommendation chatbot service: apply database \
migrations, load the deterministic catalog fixtures, check runtime readiness, and \
run one-shot chat queries without starting the HTTP server.",
    after_help = "Examples:\n  showroom migrate\n  showroom seed\n  showroom doctor --json\n  showroom ask \"I want a red SUV under $20000\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations")]
    Migrate,
    #[command(about = "Migrate, load, and verify the deterministic catalog fixtures")]
    Seed,
    #[command(about = "Check configuration, database connectivity, and catalog readiness")]
    Doctor {
        #[arg(long, help = "Emit the report as JSON instead of human-readable text")]
        json: bool,
    },
    #[command(about = "Run a single chat message through the recommendation pipeline")]
    Ask {
        #[arg(help = "Chat message, for example \"I want a red SUV under $20000\"")]
        message: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Doctor { json } => commands::CommandResult {
            exit_code: 0,
            output: commands::doctor::run(json),
        },
        Command::Ask { message } => commands::ask::run(&message),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
