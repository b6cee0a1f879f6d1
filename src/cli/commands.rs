//! Command dispatch
//!
//! Each server command performs exactly one request through [`WorkflowService`]
//! and prints the result to stdout.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::WorkflowService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{render_json, Activation};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

/// Validate configuration, then dispatch the parsed command.
///
/// Local commands (`config`, `completion`) run without credentials. Every
/// other path, including a bare invocation, requires the API key first.
pub fn execute_command(cli: &Cli, settings: Settings) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Config { command }) => return execute_config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        _ => {}
    }

    settings.require_api_key()?;

    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    let container = ServiceContainer::new(settings)?;
    execute_workflow_command(command, &container.workflow_service())
}

/// Run a server command against an already wired service.
#[instrument(level = "debug", skip_all)]
pub fn execute_workflow_command(command: &Commands, service: &WorkflowService) -> CliResult<()> {
    let rendered = match command {
        Commands::List => render_json(&service.list()?),
        Commands::Get { id } => render_json(&service.get(id)?),
        Commands::Create { file } => render_json(&service.create(file)?),
        Commands::Update { id, file } => render_json(&service.update(id, file)?),
        Commands::Activate { id } => {
            render_json(&service.set_activation(id, Activation::Activate)?)
        }
        Commands::Deactivate { id } => {
            render_json(&service.set_activation(id, Activation::Deactivate)?)
        }
        Commands::RunWebhook { url, data } => service.run_webhook(url, data)?.render(),
        Commands::Config { .. } | Commands::Completion { .. } => {
            return Err(CliError::Usage(
                "local command cannot be sent to the server".to_string(),
            ))
        }
    };
    output::info(&rendered);
    Ok(())
}

fn execute_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            match settings.require_api_key() {
                Ok(_) => output::info("# api_key: set (N8N_API_KEY)"),
                Err(_) => output::warning("N8N_API_KEY is not set"),
            }
            Ok(())
        }
        ConfigCommands::Path => {
            let path = config_path()?;
            output::info(&path.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = config_path()?;
            init_config(&RealFileSystem, &path, *force)?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn config_path() -> CliResult<PathBuf> {
    global_config_path()
        .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string()))
}

/// Write the config template to `path`, refusing to overwrite unless `force`.
pub fn init_config(fs: &dyn FileSystem, path: &Path, force: bool) -> CliResult<()> {
    if fs.exists(path) && !force {
        return Err(CliError::Usage(format!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }
    debug!("writing config template to {}", path.display());
    fs.ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create directory for {}", path.display()), e))?;
    fs.write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}
