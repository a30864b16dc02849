mod adapters;
mod cli;
mod config;
mod core;

use std::panic::{self, AssertUnwindSafe};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::context::AppContext;
use cli::{Cli, Commands};
use crate::core::errors::Result;

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    // Panics are reported by the boundary below, not the default hook.
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "panic caught at top level");
    }));

    match panic::catch_unwind(AssertUnwindSafe(|| run(&args))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
        Err(payload) => {
            cli::output::error("Something went wrong.");
            if let Some(msg) = panic_message(payload.as_ref()) {
                eprintln!("  {msg}");
            }
            std::process::exit(1);
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    let ctx = AppContext::load(args.home.as_deref(), args.api_url.as_deref())?;

    match &args.command {
        Commands::Login { token } => cli::commands::login::execute(&ctx, token.as_deref()),
        Commands::Logout => cli::commands::logout::execute(&ctx),
        Commands::List => cli::commands::list::execute(&ctx),
        Commands::Add(add) => cli::commands::add::execute(&ctx, add),
        Commands::Show { id } => cli::commands::show::execute(&ctx, *id),
        Commands::Delete { id } => cli::commands::delete::execute(&ctx, *id),
        Commands::Status => cli::commands::status::execute(&ctx),
    }
}

/// Log to stderr. `--verbose` forces debug output for this crate;
/// otherwise `RUST_LOG` applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("uselog=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uselog=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
