//! Terminal messages shared by every command handler.
//! Results go to stdout, errors to stderr.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[34m";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Punch,
}

impl Tone {
    /// (ANSI colour, icon)
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => (BLUE, "ℹ️"),
            Tone::Success => ("\x1b[32m", "✅"),
            Tone::Warning => ("\x1b[33m", "⚠️"),
            Tone::Error => ("\x1b[31m", "❌"),
            Tone::Punch => ("\x1b[32m", "⏱️"),
        }
    }
}

fn render<T: fmt::Display>(tone: Tone, msg: T) -> String {
    let (color, icon) = tone.style();
    format!("{color}{BOLD}{icon} {RESET}{msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Warning, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", render(Tone::Error, msg));
}

/// Confirmation of a recorded clock action.
pub fn punched<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Punch, msg));
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{BLUE}{BOLD}== {msg} =={RESET}\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_text_survives_styling() {
        let line = render(Tone::Warning, "User 3 skipped");
        assert!(line.starts_with("\x1b[33m"));
        assert!(line.ends_with("User 3 skipped"));
    }
}
