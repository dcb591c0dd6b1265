// ABOUTME: Themes command implementation.
// ABOUTME: Lists available themes and sets the active theme.

use crate::error::{AppError, Result};
use crate::state::config::Config;
use crate::theme;
use std::path::Path;

/// List all available themes, marking the active one.
pub fn list_themes(config: &Config) {
    let available = theme::list_themes();
    let current = &config.appearance.theme;

    println!("Available themes:");
    for name in available {
        if *name == current {
            println!("  \u{25cf} {} (active)", name);
        } else {
            println!("    {}", name);
        }
    }
}

/// Check a theme name against the registry.
pub fn validate(name: &str) -> Result<()> {
    let available = theme::list_themes();
    if available.contains(&name) {
        return Ok(());
    }
    let available_list = available
        .iter()
        .map(|t| format!("  {}", t))
        .collect::<Vec<_>>()
        .join("\n");
    Err(AppError::UnknownTheme {
        name: name.to_string(),
        available: available_list,
    })
}

/// Set the active theme in the config file.
pub fn set_theme(name: &str) -> Result<()> {
    set_theme_at(&Config::config_path()?, name)?;
    println!("Theme set to: {}", name);
    Ok(())
}

/// Rewrite only the theme of the file at `path`, leaving every other stored
/// value as the file had it. Env and flag overrides never reach the file.
pub fn set_theme_at(path: &Path, name: &str) -> Result<()> {
    validate(name)?;
    let mut stored = Config::load_from_path(path)?;
    stored.appearance.theme = name.to_string();
    stored.save_to_path(path)
}
