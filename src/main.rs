mod cli;
mod client;
mod commands;
mod config;
mod discussions;
mod error;
mod output;
mod pagination;
mod responses;
#[cfg(test)]
mod testing;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::{GitHubClient, Session};
use config::Config;
use error::Result;

const LOG_ENV: &str = "GH_DISCUSS_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gh_discuss=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            child.cancel();
        }
    });
    token
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "gh-discuss", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        command => {
            let config = Config::load()?;
            let client = GitHubClient::new(config.endpoint()?.to_string(), config.token()?);
            let session = Session::new(&client, cancel_on_ctrl_c());

            match command {
                Commands::List(args) => {
                    commands::discussions::list(&session, &config, args).await?;
                }
                Commands::View { repo, number } => {
                    commands::discussions::view(&session, &config, repo, number).await?;
                }
                Commands::Create(args) => {
                    commands::discussions::create(&session, &config, args).await?;
                }
                Commands::Update(args) => {
                    commands::discussions::update(&session, &config, args).await?;
                }
                Commands::Comments { repo, number, page } => {
                    commands::comments::list(&session, &config, repo, number, page).await?;
                }
                Commands::Comment(args) => {
                    commands::comments::add(&session, &config, args).await?;
                }
                Commands::EditComment { id, body } => {
                    commands::comments::edit(&session, &id, &body).await?;
                }
                Commands::DeleteComment { id } => {
                    commands::comments::delete(&session, &id).await?;
                }
                Commands::Categories { repo } => {
                    commands::categories::list(&session, &config, repo).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
