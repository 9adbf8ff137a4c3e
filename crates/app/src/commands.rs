//! Command execution. Every command returns the text printed on stdout.

use std::fmt::Write as _;
use std::path::PathBuf;

use janitor_application::{ApplicationError, Transport};
use janitor_domain::{
    ApiOutcome, ApiRequest, LogEntry, LogQuery, PageItem, PageResponse, SessionState, WindowOptions,
    pagination,
};
use janitor_infrastructure::write_export;
use serde_json::Value;

use crate::cli::{Command, LogsAction, list_query};
use crate::context::AppContext;
use crate::error::CliResult;

pub async fn run<T: Transport>(ctx: &AppContext<T>, command: Command) -> CliResult<String> {
    ctx.logger.set_location(command.location());
    match command {
        Command::Login { key } => {
            ctx.auth.login(&key).await.map_err(ApplicationError::from)?;
            Ok("Logged in.".to_string())
        }
        Command::Logout => {
            ctx.auth.logout().map_err(ApplicationError::from)?;
            Ok("Logged out.".to_string())
        }
        Command::Status => Ok(status(ctx).await),
        Command::Get {
            path,
            page,
            size,
            search,
            filter,
        } => {
            let mut request = ApiRequest::get(path);
            let list = list_query(page, size, search, filter);
            if let Some(list) = &list {
                request = request.with_list_query(list);
            }
            let outcome: ApiOutcome<Value> = ctx.client.execute(&request).await;
            render_outcome(&outcome, list.is_some())
        }
        Command::Logs {
            action: None,
            level,
            search,
        } => {
            let mut query = LogQuery::all();
            if let Some(level) = level {
                query = query.with_level(level);
            }
            if let Some(search) = search {
                query = query.with_search(search);
            }
            Ok(render_logs(&ctx.logger.query(&query), ctx))
        }
        Command::Logs {
            action: Some(LogsAction::Export { dir }),
            ..
        } => {
            let export = ctx.logger.export_logs().map_err(ApplicationError::from)?;
            let count = export.entries().map_or(0, |entries| entries.len());
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let path = write_export(&dir, &export).await?;
            Ok(format!("Exported {count} entries to {}", path.display()))
        }
        Command::Logs {
            action: Some(LogsAction::Clear),
            ..
        } => {
            ctx.logger.clear_logs();
            Ok("Logs cleared.".to_string())
        }
        Command::Pages {
            current,
            total,
            delta,
            max_pages,
        } => Ok(render_pages(current, total, WindowOptions {
            delta,
            max_pages_to_show: max_pages,
        })),
    }
}

async fn status<T: Transport>(ctx: &AppContext<T>) -> String {
    let state = ctx.auth.restore().await;
    let session = match state {
        SessionState::Authenticated => "authenticated",
        SessionState::Unauthenticated => "unauthenticated",
    };
    let settings = ctx.logger.settings();
    format!(
        "API: {}\nMode: {}\nSession: {session}\nLog level: {} (storage {})",
        ctx.client.config().base_url,
        ctx.mode,
        settings.level,
        if settings.enable_storage { "on" } else { "off" },
    )
}

fn render_outcome(outcome: &ApiOutcome<Value>, paged: bool) -> CliResult<String> {
    let mut out = serde_json::to_string_pretty(outcome).map_err(ApplicationError::from)?;
    if paged
        && let Some(data) = outcome.data()
        && let Ok(page) = serde_json::from_value::<PageResponse<Value>>(data.clone())
    {
        let _ = write!(out, "\n{}\n{}", page.range(), render_window(&page.window(), page.current_page));
    }
    Ok(out)
}

fn render_logs<T>(entries: &[LogEntry], ctx: &AppContext<T>) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = write!(out, "{} {}", entry.prefix(), entry.message);
        if !entry.context.is_empty() {
            let context = serde_json::to_string(&entry.context).unwrap_or_default();
            let _ = write!(out, " {context}");
        }
        out.push('\n');
    }
    let stats = ctx.logger.stats();
    let _ = write!(
        out,
        "{} shown, {} buffered (error {}, warn {}, info {}, debug {})",
        entries.len(),
        stats.total,
        stats.error,
        stats.warn,
        stats.info,
        stats.debug
    );
    out
}

fn render_pages(current: u32, total: u32, options: WindowOptions) -> String {
    if !pagination::should_render(total) {
        return "Single page, nothing to paginate.".to_string();
    }
    let window = options.compute(current, total);
    let prev = if pagination::has_previous(current) { "<" } else { " " };
    let next = if pagination::has_next(current, total) { ">" } else { " " };
    format!("{prev} {} {next}", render_window(&window, current))
}

fn render_window(window: &[PageItem], current: u32) -> String {
    window
        .iter()
        .map(|item| match item.page() {
            Some(page) if page == current => format!("[{item}]"),
            _ => item.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_pages_marks_current() {
        assert_eq!(
            render_pages(5, 20, WindowOptions::default()),
            "< 1 ... 4 5 [6] 7 8 ... 20 >"
        );
    }

    #[test]
    fn test_render_pages_edges() {
        assert_eq!(render_pages(0, 3, WindowOptions::default()), "  [1] 2 3 >");
        assert_eq!(render_pages(2, 3, WindowOptions::default()), "< 1 2 [3]  ");
        assert_eq!(
            render_pages(0, 1, WindowOptions::default()),
            "Single page, nothing to paginate."
        );
    }

    #[test]
    fn test_render_outcome_adds_page_summary() {
        let page = serde_json::json!({
            "content": [],
            "currentPage": 1,
            "totalPages": 5,
            "totalElements": 45,
            "size": 10
        });
        let out = render_outcome(&ApiOutcome::Success(page), true).unwrap();
        assert!(out.starts_with("{\n  \"success\": true"));
        assert!(out.ends_with("Showing 11 - 20 of 45\n1 [2] 3 4 5"));
    }
}
