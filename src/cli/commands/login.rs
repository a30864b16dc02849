use std::io::{self, BufRead, Write};

use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::{Result, UselogError};
use crate::core::models::session::Session;
use crate::core::traits::session_store::SessionStore;

/// Execute the `uselog login` command.
///
/// Stores the given bearer token for later commands. The token is not
/// checked against the server here; the next API call will reject it if
/// it is invalid.
pub fn execute(ctx: &AppContext, token: Option<&str>) -> Result<()> {
    let token = match token {
        Some(t) => t.trim().to_string(),
        None => read_token(&mut io::stdin().lock())?,
    };

    if token.is_empty() {
        return Err(UselogError::SessionError {
            detail: "Token is empty. Pass --token <token> or pipe it on stdin.".into(),
        });
    }

    let store = ctx.store();
    store.save(&Session::new(token))?;
    output::success(&format!("登录信息已保存到 {}", store.path().display()));
    Ok(())
}

fn read_token(input: &mut impl BufRead) -> Result<String> {
    print!("  Access token: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
