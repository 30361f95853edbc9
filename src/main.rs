use anyhow::Result;
use clap::Parser;
use mentorlink::{
    app,
    cli::{
        handle_book_command, handle_call_command, handle_mentors_command,
        handle_session_types_command, handle_slots_command, Cli, CliCommand,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("mentorlink {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::SessionTypes) => {
            handle_session_types_command()?;
            return Ok(());
        }
        Some(CliCommand::Mentors) => {
            handle_mentors_command()?;
            return Ok(());
        }
        Some(CliCommand::Slots(args)) => {
            handle_slots_command(args)?;
            return Ok(());
        }
        Some(CliCommand::Book(args)) => {
            handle_book_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Call(args)) => {
            handle_call_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Serve) | None => {}
    }

    app::run_service().await
}
