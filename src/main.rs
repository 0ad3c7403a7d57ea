// ABOUTME: Entry point for the dockwire CLI application.
// ABOUTME: Loads config, builds the connector and runs one engine operation.

mod cli;
mod output;

use clap::Parser;
use cli::{Cli, Commands, NetworkCommands};
use dockwire::config::Config;
use dockwire::connector::{Connector, ImageOps, NetworkOps};
use dockwire::error::Result;
use dockwire::params::{BuildImageParams, InspectNetworkParams, PullParams, PushParams};
use output::Output;
use std::env;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output.into());

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover_or_default(&env::current_dir()?)?,
    };
    let connector = Connector::from_config(&config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Commands::Pull {
            image,
            tag,
            registry,
            namespace,
        } => {
            let mut params = PullParams::create(image)?;
            if let Some(tag) = tag {
                params = params.with_tag(tag);
            }
            if let Some(registry) = registry {
                params = params.with_registry(registry);
            }
            if let Some(namespace) = namespace {
                params = params.with_namespace(namespace);
            }

            connector
                .pull(&params, &cancel, |event| output.progress(event))
                .await?;
            output.success(&format!("Pulled {}", params.image_fqn()));
        }
        Commands::Push {
            repository,
            tag,
            registry,
        } => {
            let mut params = PushParams::create(repository)?;
            if let Some(tag) = tag {
                params = params.with_tag(tag);
            }
            if let Some(registry) = registry {
                params = params.with_registry(registry);
            }

            let digest = connector
                .push(&params, &cancel, |event| output.progress(event))
                .await?;
            match digest {
                Some(digest) => output.success(&format!(
                    "Pushed {} ({})",
                    params.repository_fqn(),
                    digest
                )),
                None => output.success(&format!("Pushed {}", params.repository_fqn())),
            }
        }
        Commands::Build {
            context,
            repository,
            tag,
            dockerfile,
            no_cache,
            pull,
            build_args,
        } => {
            let mut params = if context.contains("://") {
                BuildImageParams::from_remote(context)?
            } else {
                BuildImageParams::from_directory(&context)?
            };
            params = params.with_no_cache(no_cache).with_pull(pull);
            if let Some(repository) = repository {
                params = params.with_repository(repository);
            }
            if let Some(tag) = tag {
                params = params.with_tag(tag);
            }
            if let Some(dockerfile) = dockerfile {
                params = params.with_dockerfile(dockerfile);
            }
            for (name, value) in build_args {
                params = params.with_build_arg(name, value);
            }

            let image_id = connector
                .build_image(&params, &cancel, |event| output.progress(event))
                .await?;
            output.success(&format!("Built {}", image_id.short()));
        }
        Commands::Network {
            command: NetworkCommands::Inspect { id },
        } => {
            let params = InspectNetworkParams::create(id)?;
            let network = connector.inspect_network(&params).await?;
            let json = serde_json::to_string_pretty(&network)?;
            println!("{json}");
        }
    }

    Ok(())
}
