use crate::cli::context::AppContext;
use crate::cli::{output, view};
use crate::core::errors::Result;
use crate::core::services::list_controller::ListController;

/// Execute the `uselog list` command.
///
/// Without a stored token the banner explains that nobody is logged in
/// and no request is sent.
pub fn execute(ctx: &AppContext) -> Result<()> {
    let api = ctx.api();
    let mut list = ListController::new(&api);

    let sp = ctx.session().map(|_| output::spinner("正在加载日志..."));
    list.mount(ctx.session());
    if let Some(sp) = sp {
        output::clear_spinner(sp);
    }

    view::print_list(&list);
    Ok(())
}
