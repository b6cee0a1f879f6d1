//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Command-line client for the n8n workflow automation REST API
#[derive(Parser, Debug)]
#[command(name = "n8nctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Server base URL (overrides config file and N8N_BASE_URL)
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub base_url: Option<String>,

    /// Config file (default: $XDG_CONFIG_HOME/n8nctl/n8nctl.toml)
    #[arg(long = "config", global = true, env = "N8NCTL_CONFIG", value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all workflows
    List,

    /// Get workflow by ID
    Get {
        /// Workflow ID
        id: String,
    },

    /// Create workflow from JSON file
    Create {
        /// Workflow definition (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Update workflow from JSON file
    Update {
        /// Workflow ID
        id: String,
        /// Workflow definition (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Activate workflow
    Activate {
        /// Workflow ID
        id: String,
    },

    /// Deactivate workflow
    Deactivate {
        /// Workflow ID
        id: String,
    },

    /// Execute a webhook
    #[command(name = "run_webhook", alias = "run-webhook")]
    RunWebhook {
        /// Webhook URL
        #[arg(value_hint = ValueHint::Url)]
        url: String,
        /// JSON payload
        #[arg(long, default_value = "{}")]
        data: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Commands that work without a server and without credentials.
    pub fn is_local(&self) -> bool {
        matches!(self, Commands::Config { .. } | Commands::Completion { .. })
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings (API key redacted)
    Show,

    /// Show config file path
    Path,

    /// Create config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
