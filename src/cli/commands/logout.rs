use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::session_store::SessionStore;

/// Execute the `uselog logout` command.
pub fn execute(ctx: &AppContext) -> Result<()> {
    let was_logged_in = ctx.session().is_some();
    ctx.store().clear()?;
    if was_logged_in {
        output::success("已退出登录");
    } else {
        output::warning("当前未登录");
    }
    Ok(())
}
