use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use txc_console::StatusFilter;
use txc_model::{ExecutorForm, RetryKind, WriteConcernLevel};

/// Executor admin console
#[derive(Parser, Debug)]
#[command(name = "txc-admin", version)]
#[command(about = "Inspect and configure executors of a task backend", long_about = None)]
pub struct Cli {
    /// Backend API base URL (e.g., http://localhost:8080/v1)
    #[arg(long = "api-base", global = true)]
    pub api_base: Option<String>,

    /// JSON configuration file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (e.g., info, txc_client=debug)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Log format: text, json or journald
    #[arg(long = "log-format", global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List executors, one page at a time
    List {
        /// all, enabled or disabled
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Case-insensitive substring of the name
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show the settings of one executor
    Show { name: String },

    /// Create an executor
    Add {
        /// Executor name; converted to snake_case
        #[arg(long)]
        name: String,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Change the settings of an existing executor
    Edit {
        name: String,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Remove an executor
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Dead-letter queue actions
    #[command(subcommand)]
    Dlq(DlqCommand),
}

#[derive(Subcommand, Debug)]
pub enum DlqCommand {
    /// Save the queued tasks to `<name>_dlq.json`
    Download {
        name: String,

        /// Output directory (default: the configured download directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Drop every queued task
    Clear {
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    /// `--yes` of the confirming subcommands.
    pub fn assume_yes(&self) -> bool {
        match self {
            Command::Delete { yes, .. } | Command::Dlq(DlqCommand::Clear { yes, .. }) => *yes,
            _ => false,
        }
    }
}

/// Settings flags shared by `add` and `edit`. Unset flags leave the form as is.
#[derive(Args, Debug, Default, Clone)]
pub struct PolicyArgs {
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    #[arg(long)]
    pub disable: bool,

    /// constant, linear or exponential
    #[arg(long)]
    pub retry: Option<RetryKind>,

    /// Attempt limit; 0 means unlimited
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Base retry interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Enable the dead-letter queue with this queue name
    #[arg(long, conflicts_with = "no_dlq")]
    pub dlq_queue: Option<String>,

    /// Disable the dead-letter queue
    #[arg(long)]
    pub no_dlq: bool,

    /// replica_acknowledged, majority, unacknowledged or journaled
    #[arg(long)]
    pub write_concern: Option<WriteConcernLevel>,
}

impl PolicyArgs {
    pub fn apply(&self, form: &mut ExecutorForm) {
        if self.enable {
            form.enabled = true;
        }
        if self.disable {
            form.enabled = false;
        }
        if let Some(kind) = self.retry {
            form.retry_type = kind.as_str().to_string();
        }
        if let Some(max) = self.max_attempts {
            form.max_attempts = if max == 0 { String::new() } else { max.to_string() };
        }
        if let Some(ms) = self.interval_ms {
            form.interval_ms = ms.to_string();
        }
        if let Some(queue) = &self.dlq_queue {
            form.dlq_enabled = true;
            form.dlq_queue_name.clone_from(queue);
        }
        if self.no_dlq {
            form.dlq_enabled = false;
        }
        if let Some(level) = self.write_concern {
            form.write_concern = level.as_str().to_string();
        }
    }
}
