pub mod banner;
pub mod router;
pub mod tui;

pub use router::ChannelRouter;
pub use tui::TuiInputPort;

use crossterm::style::Color;

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}

/// ARGB → terminal color; alpha is ignored.
pub(crate) fn argb_to_color(argb: u32) -> Color {
    Color::Rgb {
        r: (argb >> 16) as u8,
        g: (argb >> 8) as u8,
        b: argb as u8,
    }
}
