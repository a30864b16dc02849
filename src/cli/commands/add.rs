use std::io::{self, BufRead, Write};

use crate::cli::AddArgs;
use crate::cli::context::AppContext;
use crate::cli::{output, view};
use crate::core::errors::{Result, UselogError};
use crate::core::models::draft::{Field, LogDraft};
use crate::core::models::session::Session;
use crate::core::models::usage_log::{Action, ResourceType, UsageLog};
use crate::core::services::form_controller::{FormController, FormState};
use crate::core::services::list_controller::ListController;
use crate::core::traits::log_api::LogApi;

/// Execute the `uselog add` command.
///
/// Loads the current list, submits the draft built from the flags (or
/// prompted for with `--interactive`), and prints the list with the new
/// entry on top.
pub fn execute(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let api = ctx.api();
    let session = ctx.session();

    let mut list = ListController::new(&api);
    let sp = session.map(|_| output::spinner("正在加载日志..."));
    list.mount(session);
    if let Some(sp) = sp {
        output::clear_spinner(sp);
    }

    let mut form = FormController::with_draft(&api, draft_from_args(args));
    let record = if args.interactive {
        run_interactive(&mut form, session, &mut list, &mut io::stdin().lock())?
    } else {
        submit(&mut form, session, &mut list)?
    };

    output::success(&format!("日志添加成功 (#{})", record.id));
    view::print_list(&list);
    Ok(())
}

/// Build the initial draft: defaults, overridden by any flag given.
fn draft_from_args(args: &AddArgs) -> LogDraft {
    let mut draft = LogDraft::default();
    let flags = [
        (Field::ResourceType, &args.resource_type),
        (Field::ResourceId, &args.resource_id),
        (Field::Action, &args.action),
        (Field::QuantityUsed, &args.quantity),
        (Field::DurationMinutes, &args.duration),
        (Field::Purpose, &args.purpose),
        (Field::Notes, &args.notes),
        (Field::IssuesReported, &args.issues),
        (Field::ProjectName, &args.project),
    ];
    for (field, value) in flags {
        if let Some(v) = value {
            draft.set(field, v);
        }
    }
    draft.auto_recorded = args.auto_recorded;
    draft
}

/// Submit once. Server failures come back with the form's error text.
fn submit<A: LogApi>(
    form: &mut FormController<'_, A>,
    session: Option<&Session>,
    list: &mut ListController<'_, A>,
) -> Result<UsageLog> {
    let sp = output::spinner("正在提交...");
    let result = form.submit(session, list);
    output::clear_spinner(sp);

    result.map_err(|e| match form.state() {
        FormState::Error(message) if !e.is_auth() => UselogError::SubmitFailed {
            message: message.clone(),
        },
        _ => e,
    })
}

/// Prompt for every field, then submit. Invalid fields are asked for
/// again; after a server failure the unchanged draft can be resubmitted.
fn run_interactive<A: LogApi>(
    form: &mut FormController<'_, A>,
    session: Option<&Session>,
    list: &mut ListController<'_, A>,
    input: &mut impl BufRead,
) -> Result<UsageLog> {
    output::header("添加使用日志");
    println!("  Enter keeps the value in brackets, '-' clears it.\n");

    let mut pending: Vec<Field> = Field::ALL.to_vec();
    loop {
        for field in &pending {
            prompt_field(form, *field, input)?;
        }

        match submit(form, session, list) {
            Ok(record) => return Ok(record),
            Err(UselogError::Validation { .. }) => {
                for e in form.field_errors() {
                    output::error(&format!("{}: {}", e.field.label(), e.message));
                }
                pending = form.field_errors().iter().map(|e| e.field).collect();
            }
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                output::error(&e.to_string());
                if !confirm("  重试提交? [Y/n]: ", input)? {
                    return Err(e);
                }
                pending.clear();
            }
        }
    }
}

fn prompt_field<A: LogApi>(
    form: &mut FormController<'_, A>,
    field: Field,
    input: &mut impl BufRead,
) -> Result<()> {
    let current = form.draft().get(field);
    print!("  {}{} [{current}]: ", field.label(), choices(field));
    io::stdout().flush()?;

    let value = read_line(input)?;
    match value.as_str() {
        "" => {}
        "-" => form.set_field(field, ""),
        v => form.set_field(field, v),
    }
    Ok(())
}

/// Allowed values for the closed fields, shown next to the label.
fn choices(field: Field) -> String {
    let options: Vec<String> = match field {
        Field::ResourceType => ResourceType::ALL
            .iter()
            .map(|rt| format!("{}={}", rt.as_str(), rt.label()))
            .collect(),
        Field::Action => Action::ALL
            .iter()
            .map(|a| format!("{}={}", a.as_str(), a.label()))
            .collect(),
        Field::AutoRecorded => vec!["y".into(), "n".into()],
        _ => return String::new(),
    };
    format!(" ({})", options.join(" / "))
}

fn confirm(question: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{question}");
    io::stdout().flush()?;
    let answer = read_line(input)?.to_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the form was complete",
        )
        .into());
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::test_support::{FakeApi, sample_log};
    use std::io::Cursor;

    fn mounted<'a>(api: &'a FakeApi, session: &Session) -> ListController<'a, FakeApi> {
        let mut list = ListController::new(api);
        list.mount(Some(session));
        list
    }

    #[test]
    fn flags_override_defaults() {
        let args = AddArgs {
            resource_type: Some("material".into()),
            resource_id: Some("3".into()),
            action: Some("consume".into()),
            quantity: Some("2".into()),
            auto_recorded: true,
            ..AddArgs::default()
        };

        let draft = draft_from_args(&args);

        assert_eq!(draft.resource_type, "material");
        assert_eq!(draft.resource_id, "3");
        assert_eq!(draft.action, "consume");
        assert_eq!(draft.quantity_used, "2");
        assert_eq!(draft.duration_minutes, "");
        assert!(draft.auto_recorded);
    }

    #[test]
    fn no_flags_keeps_defaults() {
        assert_eq!(draft_from_args(&AddArgs::default()), LogDraft::default());
    }

    #[test]
    fn server_failure_is_reported_with_form_message() {
        let api = FakeApi::default();
        let session = Session::new("t");
        let mut list = mounted(&api, &session);
        let mut form = FormController::new(&api);
        form.set_field(Field::ResourceId, "1");

        api.fail_next_create(UselogError::ServerRejected {
            status: 400,
            detail: "资源不存在".into(),
        });
        let err = submit(&mut form, Some(&session), &mut list).unwrap_err();

        assert_eq!(err.to_string(), "提交失败: 资源不存在");
    }

    #[test]
    fn interactive_accepts_defaults_and_typed_values() {
        let api = FakeApi::with_logs(vec![sample_log(1)]);
        let session = Session::new("t");
        let mut list = mounted(&api, &session);
        let mut form = FormController::new(&api);

        // type, id, action, qty, duration, purpose, notes, issues, project, auto
        let mut input = Cursor::new("\n5\nend_use\n1.5\n\n校准\n\n\n\ny\n");
        let record = run_interactive(&mut form, Some(&session), &mut list, &mut input).unwrap();

        assert_eq!(record.resource_id, 5);
        assert_eq!(record.action, Action::EndUse);
        assert_eq!(record.quantity_used, Some(1.5));
        assert_eq!(record.purpose.as_deref(), Some("校准"));
        assert!(record.auto_recorded);
        assert_eq!(list.records()[0], record);
        assert_eq!(list.records().len(), 2);
    }

    #[test]
    fn interactive_reprompts_only_invalid_fields() {
        let api = FakeApi::default();
        let session = Session::new("t");
        let mut list = mounted(&api, &session);
        let mut form = FormController::new(&api);

        // first pass: no id and a negative quantity; second pass fixes both
        let mut input = Cursor::new("\n\n\n-2\n\n\n\n\n\n\n8\n2\n");
        let record = run_interactive(&mut form, Some(&session), &mut list, &mut input).unwrap();

        assert_eq!(record.resource_id, 8);
        assert_eq!(record.quantity_used, Some(2.0));
        assert_eq!(api.create_calls(), 1);
    }

    #[test]
    fn interactive_retries_unchanged_draft_after_server_error() {
        let api = FakeApi::default();
        let session = Session::new("t");
        let mut list = mounted(&api, &session);
        let mut form = FormController::new(&api);
        api.fail_next_create(UselogError::Network {
            reason: "timeout".into(),
        });

        let mut input = Cursor::new(format!("\n4\n{}", "\n".repeat(9)));
        let record = run_interactive(&mut form, Some(&session), &mut list, &mut input).unwrap();

        assert_eq!(record.resource_id, 4);
        assert_eq!(api.create_calls(), 2);
        assert_eq!(api.last_payload().unwrap().resource_id, 4);
    }

    #[test]
    fn interactive_gives_up_when_retry_declined() {
        let api = FakeApi::default();
        let session = Session::new("t");
        let mut list = mounted(&api, &session);
        let mut form = FormController::new(&api);
        api.fail_next_create(UselogError::Network {
            reason: "timeout".into(),
        });

        let mut input = Cursor::new(format!("\n4\n{}n\n", "\n".repeat(8)));
        let err = run_interactive(&mut form, Some(&session), &mut list, &mut input).unwrap_err();

        assert_eq!(err.to_string(), "提交失败: timeout");
        assert_eq!(form.draft().resource_id, "4");
    }

    #[test]
    fn interactive_stops_on_closed_input() {
        let api = FakeApi::default();
        let session = Session::new("t");
        let mut list = mounted(&api, &session);
        let mut form = FormController::new(&api);

        let mut input = Cursor::new("\n");
        let err = run_interactive(&mut form, Some(&session), &mut list, &mut input).unwrap_err();

        assert!(matches!(err, UselogError::Io(_)));
        assert_eq!(api.create_calls(), 0);
    }
}
