use colored::Colorize;

use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::{NOT_LOGGED_IN, Result};

/// Execute the `uselog status` command.
///
/// Shows where requests go and whether a token is stored. Makes no
/// network calls.
pub fn execute(ctx: &AppContext) -> Result<()> {
    let config = ctx.config();

    output::header(&format!("uselog v{}", env!("CARGO_PKG_VERSION")));
    println!("  API: {}", ctx.api().base_url().cyan());
    println!("  Timeout: {}s", config.api.timeout_secs);
    println!("  Home: {}", ctx.home().display());
    println!("  Session file: {}", ctx.store().path().display());

    println!("\n{}", "  Session".bold());
    match ctx.session() {
        Some(session) => {
            let since = session
                .saved_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            output::success(&format!("已登录 (token saved {since})"));
        }
        None => {
            output::warning(NOT_LOGGED_IN);
            println!("  Run 'uselog login --token <token>' to store one.");
        }
    }

    Ok(())
}
