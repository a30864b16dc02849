use unicode_width::UnicodeWidthStr;

use crate::cli::output;
use crate::core::models::usage_log::UsageLog;
use crate::core::services::list_controller::ListController;
use crate::core::traits::log_api::LogApi;

/// Column headers of the log table, in display order.
pub const COLUMNS: [&str; 13] = [
    "ID", "用户ID", "资源类型", "资源ID", "操作", "数量", "时长", "目的", "备注", "问题反馈", "项目",
    "自动记录", "时间",
];

const EMPTY: &str = "暂无数据";

/// Print the list section: the error banner (if any) followed by the table.
pub fn print_list<A: LogApi>(list: &ListController<'_, A>) {
    output::header("日志列表");
    if let Some(msg) = list.error() {
        output::banner(msg);
    }
    print!("{}", render_table(list.records()));
}

/// One table row, formatted cell by cell.
pub fn row_cells(log: &UsageLog) -> [String; 13] {
    [
        log.id.to_string(),
        opt(log.user_id),
        log.resource_type.to_string(),
        log.resource_id.to_string(),
        log.action.to_string(),
        opt(log.quantity_used),
        opt(log.duration_minutes),
        text(&log.purpose),
        text(&log.notes),
        text(&log.issues_reported),
        text(&log.project_name),
        if log.auto_recorded { "是" } else { "否" }.to_string(),
        log.timestamp.clone(),
    ]
}

/// Render the logs as an aligned text table. Widths are measured in
/// terminal columns so CJK text lines up.
pub fn render_table(logs: &[UsageLog]) -> String {
    let rows: Vec<[String; 13]> = logs.iter().map(row_cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(COLUMNS.iter().copied(), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&format_line(rule.iter().map(String::as_str), &widths));

    if rows.is_empty() {
        out.push_str(&format!("  {EMPTY}\n"));
        return out;
    }
    for row in &rows {
        out.push_str(&format_line(row.iter().map(String::as_str), &widths));
    }
    out
}

/// Render a single record as `label: value` lines.
pub fn render_detail(log: &UsageLog) -> String {
    let cells = row_cells(log);
    let label_width = COLUMNS.iter().map(|h| h.width()).max().unwrap_or(0);
    COLUMNS
        .iter()
        .zip(cells.iter())
        .map(|(label, value)| format!("  {}  {value}\n", pad(label, label_width)))
        .collect()
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, w)| pad(cell, *w))
        .collect();
    format!("  {}\n", line.join("  ").trim_end())
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Free text on one line: line breaks show as `⏎`, other control
/// characters as a space.
fn text(value: &Option<String>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .replace("\r\n", "\n")
        .chars()
        .map(|c| match c {
            '\n' | '\r' => '⏎',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}
