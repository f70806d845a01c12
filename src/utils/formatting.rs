//! Formatting utilities used for CLI outputs.

use crate::models::status::CurrentStatus;
use crate::utils::time::format_elapsed;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const GREY: &str = "\x1b[90m";

/// "7.50"
pub fn hours(h: f64) -> String {
    format!("{:.2}", h)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn colorize_status(status: &CurrentStatus) -> String {
    match status {
        CurrentStatus::Unknown => format!("{GREY}unknown{RESET}"),
        CurrentStatus::Known {
            activity,
            counts_as_work: true,
            ..
        } => format!("{GREEN}{activity}{RESET}"),
        CurrentStatus::Known { activity, .. } => format!("{YELLOW}{activity}{RESET}"),
    }
}

pub fn describe_since(status: &CurrentStatus) -> String {
    match status {
        CurrentStatus::Unknown => "--".to_string(),
        CurrentStatus::Known { since_seconds, .. } => format_elapsed(*since_seconds),
    }
}
