//! Results pane: picks what to show below the search bar for the current
//! [`SearchState`] and renders it.

use crate::theme::Theme;
use crate::widgets::{
    featured::FeaturedPanel,
    result_grid::{ResultGrid, ResultGridState},
};
use dox_core::{FetchStatus, SearchState};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph, Widget, Wrap},
};

/// What the results pane is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// No active query: the featured-diseases panel.
    Featured,
    Loading,
    Failed,
    /// A completed search with at least one result.
    Cards,
    /// A completed search that found nothing.
    NoResults,
}

impl Panel {
    pub fn for_state(state: &SearchState) -> Self {
        match state.status() {
            FetchStatus::Loading => Panel::Loading,
            FetchStatus::Failed(_) => Panel::Failed,
            FetchStatus::Success if !state.results().is_empty() => Panel::Cards,
            FetchStatus::Success => Panel::NoResults,
            FetchStatus::Idle if state.is_blank() => Panel::Featured,
            FetchStatus::Idle => Panel::NoResults,
        }
    }
}

pub struct ResultsPane<'a> {
    search: &'a SearchState,
    grid: &'a ResultGridState,
    focused: bool,
    columns: u16,
    theme: &'a Theme,
}

impl<'a> ResultsPane<'a> {
    pub fn new(
        search: &'a SearchState,
        grid: &'a ResultGridState,
        focused: bool,
        columns: u16,
        theme: &'a Theme,
    ) -> Self {
        Self { search, grid, focused, columns, theme }
    }
}

impl Widget for ResultsPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match Panel::for_state(self.search) {
            Panel::Featured => FeaturedPanel::new(self.columns, self.theme).render(area, buf),
            Panel::Cards => ResultGrid::new(
                self.search.results(),
                self.grid,
                self.focused,
                self.columns,
                self.theme,
            )
            .render(area, buf),
            Panel::Loading => message(area, buf, "Loading...", self.theme.loading, self.theme),
            Panel::Failed => {
                let text = self.search.status().error().unwrap_or_default();
                message(area, buf, text, self.theme.error, self.theme)
            }
            Panel::NoResults => message(
                area,
                buf,
                "No results",
                Style::default().add_modifier(Modifier::DIM),
                self.theme,
            ),
        }
    }
}

fn message(area: Rect, buf: &mut Buffer, text: &str, style: Style, theme: &Theme) {
    let block = Block::bordered().border_style(theme.border_unfocused);
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}
