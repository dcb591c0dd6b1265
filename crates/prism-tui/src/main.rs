// ABOUTME: Entry point for the prism binary.
// ABOUTME: Parses CLI args and launches the TUI or runs subcommands.

use clap::{CommandFactory, Parser};
use prism_tui::cli::{self, Cli, Command, ConfigAction, ThemeAction};
use prism_tui::error;
use prism_tui::state::config::Config;
use std::future::Future;

fn main() {
    let cli = Cli::parse();

    // The TUI owns the screen, so it logs to a file instead of stderr
    if cli.command.is_none() {
        prism_log::init_file("tui");
    } else {
        prism_log::init();
    }

    // Load config with CLI overrides
    let config = match Config::load(cli.theme.as_deref(), cli.no_circles) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Command::Version) => {
            println!("prism {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Command::Extract {
            image,
            count,
            quality,
            json,
        }) => {
            let options = cli::extract::ExtractOptions {
                image: &image,
                count,
                quality,
                json,
            };
            block_on_or_exit(cli::extract::run(&config, options));
        }
        Some(Command::Preview { image }) => {
            exit_on_error(cli::preview::run(&image));
        }
        Some(Command::Themes { action }) => {
            handle_themes_command(action, &config);
        }
        Some(Command::Config { action }) => {
            handle_config_command(action, &config);
        }
        Some(Command::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "prism", &mut std::io::stdout());
        }
        None => {
            if let Err(e) = cli::themes::validate(&config.appearance.theme) {
                tracing::warn!("{}", e);
            }
            block_on_or_exit(prism_tui::run_tui(&config, cli.image));
        }
    }
}

fn block_on_or_exit(future: impl Future<Output = error::Result<()>>) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {}", e);
            std::process::exit(1);
        }
    };
    exit_on_error(rt.block_on(future));
}

fn exit_on_error(result: error::Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn handle_config_command(action: Option<ConfigAction>, config: &Config) {
    match action {
        Some(ConfigAction::Path) => match Config::config_path() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => eprintln!("Error: {}", e),
        },
        Some(ConfigAction::Show) | None => match config.to_toml() {
            Ok(toml) => print!("{}", toml),
            Err(e) => eprintln!("Error: {}", e),
        },
    }
}

fn handle_themes_command(action: Option<ThemeAction>, config: &Config) {
    match action {
        Some(ThemeAction::List) | None => {
            cli::themes::list_themes(config);
        }
        Some(ThemeAction::Set { name }) => {
            exit_on_error(cli::themes::set_theme(&name));
        }
    }
}
