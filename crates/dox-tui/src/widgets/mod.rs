//! Ratatui widgets for the dox TUI.

pub mod chrome;
pub mod command_bar;
pub mod featured;
pub mod help;
pub mod result_grid;
pub mod results;
pub mod search_bar;
