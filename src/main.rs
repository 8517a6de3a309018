use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nexus_allowlist::cli::{
    AptArgs, Commands, ConnectionArgs, run_change_initial_password, run_initial_configuration,
    run_test_authentication, run_update_allowlists,
};

#[derive(Parser)]
#[command(name = "nexus-allowlist")]
#[command(version, about = "Enforce allowlists for Nexus3", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    apt: AptArgs,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("nexus_allowlist=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let apt = cli.apt.settings();

    match cli.command {
        Commands::ChangeInitialPassword { path } => {
            run_change_initial_password(&cli.connection, &path)?;
        }
        Commands::TestAuthentication => {
            if !run_test_authentication(&cli.connection)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::InitialConfiguration(packages) => {
            run_initial_configuration(&cli.connection, &packages, &apt)?;
        }
        Commands::UpdateAllowlists(packages) => {
            run_update_allowlists(&cli.connection, &packages, &apt)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
