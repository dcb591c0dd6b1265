// ABOUTME: CLI command definitions using clap.
// ABOUTME: Handles subcommands like extract, preview, themes.

pub mod extract;
pub mod preview;
pub mod themes;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "prism",
    about = "Prism - reveal the color palette of an image"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image to open right away (skips the welcome screen)
    pub image: Option<PathBuf>,

    /// Theme override
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Disable the decorative background circles
    #[arg(long, global = true)]
    pub no_circles: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the palette of an image
    Extract {
        /// Image file
        image: PathBuf,
        /// Number of colors (defaults to the configured palette size)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Sampling stride, 1 (every pixel) to 10
        #[arg(short, long)]
        quality: Option<usize>,
        /// Print a JSON array instead of swatches
        #[arg(long)]
        json: bool,
    },
    /// Print the data URI of an image
    Preview {
        /// Image file
        image: PathBuf,
    },
    /// Manage themes
    Themes {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Show config file path
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// List available themes
    List,
    /// Set active theme
    Set { name: String },
}
