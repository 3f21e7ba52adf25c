//! dox TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Start the interactive terminal UI with the given configuration.
pub fn run(config: dox_core::config::Config) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(config, theme).run()
}
