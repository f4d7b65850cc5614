use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::error::{DiscussError, Result};
use crate::responses::PageInfo;

static FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let raw = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    FORMAT.store(raw, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn is_json_output() -> bool {
    matches!(format(), OutputFormat::Json)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(DiscussError::Encoding)
}

/// Print rows as a table, one line per item, or JSON depending on output mode
pub fn print_table<T, R, F, C>(items: &[T], to_row: F, compact: C) -> Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
    C: Fn(&T) -> String,
{
    match format() {
        OutputFormat::Json => println!("{}", to_json(items)?),
        OutputFormat::Compact => {
            for item in items {
                println!("{}", compact(item));
            }
        }
        OutputFormat::Table => {
            let rows: Vec<R> = items.iter().map(to_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
    Ok(())
}

/// Print a whole page as JSON, or its rows followed by a cursor hint
pub fn print_page<P, T, R, F, C>(
    page: &P,
    items: &[T],
    page_info: &PageInfo,
    to_row: F,
    compact: C,
) -> Result<()>
where
    P: Serialize,
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
    C: Fn(&T) -> String,
{
    if is_json_output() {
        println!("{}", to_json(page)?);
        return Ok(());
    }

    print_table(items, to_row, compact)?;
    if let (true, Some(cursor)) = (page_info.has_next_page, page_info.end_cursor.as_deref()) {
        eprintln!("{}", format!("More results: --after {cursor}").bright_black());
    }
    Ok(())
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) -> Result<()> {
    if is_json_output() {
        println!("{}", to_json(item)?);
    } else {
        display(item);
    }
    Ok(())
}

/// Print a success message unless quiet
pub fn print_message(message: &str) -> Result<()> {
    if QUIET.load(Ordering::Relaxed) {
        return Ok(());
    }
    if is_json_output() {
        println!("{}", to_json(&serde_json::json!({ "message": message }))?);
    } else {
        println!("{message}");
    }
    Ok(())
}

pub fn state_colored(closed: bool, answered: bool) -> String {
    if closed {
        "closed".bright_black().to_string()
    } else if answered {
        "answered".green().to_string()
    } else {
        "open".to_string()
    }
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = (*dt).into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a relative time (e.g., "2 days ago")
pub fn format_relative(dt: &DateTime<Utc>) -> String {
    let diff = Utc::now().signed_duration_since(*dt);

    if diff.num_seconds() < 60 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        let mins = diff.num_minutes();
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff.num_hours() < 24 {
        let hours = diff.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff.num_days() < 30 {
        let days = diff.num_days();
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}

/// Truncate a string with ellipsis, on a char boundary
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
