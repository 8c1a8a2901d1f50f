//! ASCII banner (REPO VIEWER), striped in language colors.

use super::argb_to_color;
use crate::adapters::github::mapper::language_color;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "REPO VIEWER";

/// Title rows cycle through these, same palette as the repository list.
const STRIPES: [&str; 4] = ["Kotlin", "Rust", "Go", "Python"];

fn render_title() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .unwrap_or_else(|| TITLE.to_string())
}

fn stripe(row: usize) -> Color {
    language_color(STRIPES[row % STRIPES.len()])
        .map(argb_to_color)
        .unwrap_or(Color::White)
}

/// Prints the title, one language color per row, then the version.
pub fn print_welcome() {
    let mut out = stdout();
    for (row, line) in render_title().lines().enumerate() {
        let _ = out.execute(SetForegroundColor(stripe(row)));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(Print(format!("v{}\r\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stripe_language_has_a_color() {
        for language in STRIPES {
            assert!(language_color(language).is_some(), "{}", language);
        }
        assert_ne!(stripe(0), Color::White);
        assert_eq!(stripe(STRIPES.len()), stripe(0));
    }

    #[test]
    fn title_renders_to_multiple_lines() {
        assert!(render_title().lines().count() > 1);
    }
}
