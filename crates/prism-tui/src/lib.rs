// ABOUTME: Library interface for prism-tui.
// ABOUTME: Exposes the TUI runner and CLI pieces used by the prism binary.

mod app;
mod app_event;
pub mod cli;
pub mod error;
pub mod state;
pub mod theme;
mod tui;
mod widgets;

use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use rand::seq::SliceRandom;
use state::config::Config;
use std::io::Write;
use std::path::PathBuf;

const GOODBYES: &[&str] = &[
    "See you soon!",
    "Until next time!",
    "Goodbye for now!",
    "Catch you later!",
    "Happy painting!",
    "Go make something colorful!",
];

const TAGLINES: &[&str] = &[
    "Every picture hides a palette.",
    "Six colors at a time.",
    "The swatches will wait for you.",
    "Color is a story told in hex.",
    "May your gradients be smooth.",
];

fn print_exit_message() {
    let mut rng = rand::thread_rng();
    let goodbye = GOODBYES.choose(&mut rng).unwrap_or(&"See you soon!");
    let tagline = TAGLINES
        .choose(&mut rng)
        .unwrap_or(&"Every picture hides a palette.");

    let mut stdout = std::io::stdout();
    let _ = writeln!(stdout);
    let _ = write!(stdout, "  {}", SetForegroundColor(Color::Cyan));
    let _ = write!(stdout, "{}", goodbye);
    let _ = writeln!(stdout, "{}", ResetColor);
    let _ = writeln!(stdout);
    let _ = write!(stdout, "  ");
    for (r, g, b) in [
        (239, 68, 68),
        (245, 158, 11),
        (234, 179, 8),
        (34, 197, 94),
        (59, 130, 246),
        (168, 85, 247),
    ] {
        let _ = write!(stdout, "{}██", SetForegroundColor(Color::Rgb { r, g, b }));
    }
    let _ = write!(stdout, "{}", ResetColor);
    let _ = write!(stdout, "  {}", SetForegroundColor(Color::Cyan));
    let _ = write!(stdout, "{}", SetAttribute(Attribute::Bold));
    let _ = write!(stdout, "prism");
    let _ = writeln!(stdout, "{}", SetAttribute(Attribute::Reset));
    let _ = write!(stdout, "  {}", SetForegroundColor(Color::DarkGrey));
    let _ = write!(stdout, "{}", tagline);
    let _ = writeln!(stdout, "{}", ResetColor);
    let _ = writeln!(stdout);
}

/// Run the palette TUI.
///
/// Takes over the terminal until the user quits. With `image`, the welcome
/// screen is skipped and the file starts loading immediately.
///
/// # Errors
/// Returns an error if the terminal cannot be set up or drawn to.
pub async fn run_tui(config: &Config, image: Option<PathBuf>) -> error::Result<()> {
    tracing::debug!(?config, "Loaded configuration");

    let clipboard = prism_core::clipboard::system_or_unavailable();
    let mut app = app::App::new(config, clipboard);
    let initial = image.and_then(|path| app.open(path));

    let mut tui = tui::Tui::new()?;
    app.run(&mut tui, initial).await?;
    drop(tui);

    print_exit_message();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_message_arrays_are_non_empty() {
        assert!(!GOODBYES.is_empty(), "GOODBYES array must not be empty");
        assert!(!TAGLINES.is_empty(), "TAGLINES array must not be empty");
    }
}
