use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{span, Instrument, Level};

use cfcli::{
    api_client::ApiClient,
    commands::{
        self,
        stack::{ListStackCommand, StackArgs},
        stacks::{ListStacksCommand, StacksArgs},
    },
    config::Config,
    requirements::ConfigRequirementsFactory,
    stacks::CloudControllerStackRepository,
    ui::TerminalUi,
};

#[derive(Parser)]
#[command(name = "cf", version, about, long_about = None)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information for a stack
    Stack(StackArgs),
    /// List all stacks
    Stacks(StacksArgs),
}

fn log_level(verbose: bool) -> Level {
    let trace = std::env::var("CF_TRACE")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    match (trace, verbose) {
        (true, _) => Level::TRACE,
        (false, true) => Level::DEBUG,
        (false, false) => Level::WARN,
    }
}

#[::tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    let config_path = Config::default_path()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("Loading config from {}", config_path.display()))?;
    let client = ApiClient::new(&config.target, &config.access_token, config.ssl_disabled)
        .context("Building API client")?;
    let repository = CloudControllerStackRepository::new(client);
    let requirements = ConfigRequirementsFactory::new(&config);
    let mut ui = TerminalUi::new();

    let succeeded = match cli.command {
        Commands::Stack(args) => {
            let span = span!(Level::INFO, "stack", stack = args.stack_name.as_str());
            let mut cmd = ListStackCommand::new(&config, &repository);
            commands::run(&mut cmd, args, &requirements, &mut ui)
                .instrument(span)
                .await
        }
        Commands::Stacks(args) => {
            let span = span!(Level::INFO, "stacks");
            let mut cmd = ListStacksCommand::new(&config, &repository);
            commands::run(&mut cmd, args, &requirements, &mut ui)
                .instrument(span)
                .await
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
