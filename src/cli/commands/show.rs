use crate::cli::context::AppContext;
use crate::cli::{output, view};
use crate::core::errors::Result;
use crate::core::traits::log_api::LogApi;

/// Execute the `uselog show <id>` command.
pub fn execute(ctx: &AppContext, id: i64) -> Result<()> {
    let session = ctx.require_session()?;
    let api = ctx.api();

    let sp = output::spinner(&format!("正在获取日志 #{id}..."));
    let result = api.get_log(session, id);
    output::clear_spinner(sp);
    let log = result?;

    output::header(&format!("日志 #{}", log.id));
    print!("{}", view::render_detail(&log));
    Ok(())
}
