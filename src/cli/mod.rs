pub mod commands;
pub mod context;
pub mod output;
pub mod view;

use clap::{Args, Parser, Subcommand};

/// Record and list equipment and material usage logs.
#[derive(Parser, Debug)]
#[command(name = "uselog", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.toml and the session file
    #[arg(long, global = true, env = "USELOG_HOME")]
    pub home: Option<String>,

    /// Usage-log endpoint, e.g. http://127.0.0.1:8000/api/logs/
    #[arg(long, global = true, env = "USELOG_API_URL")]
    pub api_url: Option<String>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store the access token used for API calls
    Login {
        /// Bearer token (read from stdin when omitted)
        #[arg(long)]
        token: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// List usage logs
    List,

    /// Submit a new usage log
    Add(AddArgs),

    /// Show a single usage log
    Show {
        /// Log id
        id: i64,
    },

    /// Delete a usage log (admin only)
    Delete {
        /// Log id
        id: i64,
    },

    /// Show configuration and login status
    Status,
}

/// Form fields for `uselog add`. Values are passed through as text and
/// validated before anything is sent.
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// equipment | material [default: equipment]
    #[arg(long)]
    pub resource_type: Option<String>,

    /// Id of the equipment or material
    #[arg(long, allow_hyphen_values = true)]
    pub resource_id: Option<String>,

    /// start_use | end_use | consume | maintenance [default: start_use]
    #[arg(long)]
    pub action: Option<String>,

    /// Quantity used or consumed
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<String>,

    /// Duration of use in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<String>,

    /// Purpose of use
    #[arg(long)]
    pub purpose: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Problems found during use
    #[arg(long)]
    pub issues: Option<String>,

    /// Project name
    #[arg(long)]
    pub project: Option<String>,

    /// Mark the entry as automatically recorded
    #[arg(long)]
    pub auto_recorded: bool,

    /// Prompt for each field instead of using flags
    #[arg(short, long)]
    pub interactive: bool,
}
