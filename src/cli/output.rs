use colored::Colorize;
use std::fmt;
use std::io::IsTerminal;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Section,
}

/// Enables colors only when asked for and stdout is a terminal.
pub fn configure_colors(enabled: bool) {
    let colorize = enabled && std::io::stdout().is_terminal();
    colored::control::set_override(colorize);
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => format!("[ok] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    println!("{}", apply_style(kind, message));
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_styles_when_colors_are_off() {
        colored::control::set_override(false);
        assert_eq!(apply_style(MessageKind::Info, "x"), "x");
        assert_eq!(apply_style(MessageKind::Success, "saved"), "[ok] saved");
        assert_eq!(apply_style(MessageKind::Warning, "careful"), "[!] careful");
        assert_eq!(apply_style(MessageKind::Section, " Debts "), "=== Debts ===");
    }
}
