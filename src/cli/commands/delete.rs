use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::log_api::LogApi;

/// Execute the `uselog delete <id>` command.
///
/// The server only allows administrators to delete; anyone else gets the
/// server's permission message back.
pub fn execute(ctx: &AppContext, id: i64) -> Result<()> {
    let session = ctx.require_session()?;
    let api = ctx.api();

    let sp = output::spinner(&format!("正在删除日志 #{id}..."));
    let result = api.delete_log(session, id);
    output::clear_spinner(sp);
    let deleted = result?;

    output::success(&format!(
        "已删除日志 #{} ({} {} {})",
        deleted.id, deleted.resource_type, deleted.resource_id, deleted.action
    ));
    Ok(())
}
