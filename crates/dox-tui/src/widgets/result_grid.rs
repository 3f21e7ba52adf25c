//! Result grid widget: one card per ontology term, laid out in rows.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `←` / `h`, `→` / `l` | Previous / next card |
//! | `↑` / `k`, `↓` / `j` | Card above / below |
//! | `PageUp` / `Ctrl+u` | Up one screen of rows |
//! | `PageDown` / `Ctrl+d` | Down one screen of rows |
//! | `g` / `G` | First / last card |
//!
//! # Scroll semantics
//!
//! `selected` is an absolute index into the result set. The first visible
//! grid row is derived at render time so the selected card is always on
//! screen; the grid geometry from the last render is cached so `handle()`
//! can move by whole rows and pages.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use dox_core::OntologyTerm;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
        Wrap,
    },
};

/// Rows per card: border, label, IRI, two description lines, OBO ID, border.
pub const CARD_HEIGHT: u16 = 7;
const MIN_CARD_WIDTH: u16 = 28;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultGridState {
    /// Index of the highlighted card.
    pub selected: usize,
    /// First visible grid row, updated on render.
    top_row: Cell<usize>,
    /// Cards per row at the last render.
    columns: Cell<usize>,
    /// Fully visible grid rows at the last render.
    visible_rows: Cell<usize>,
}

impl Default for ResultGridState {
    fn default() -> Self {
        Self {
            selected: 0,
            top_row: Cell::new(0),
            columns: Cell::new(1),
            visible_rows: Cell::new(1),
        }
    }
}

impl ResultGridState {
    /// Go back to the first card. Called whenever a new result set arrives.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.top_row.set(0);
    }

    /// Handle a navigation event for a result set of `len` cards.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            return;
        }
        let cols = self.columns.get().max(1);
        let page = cols * self.visible_rows.get().max(1);
        let last = len - 1;

        let next = match event {
            AppEvent::Nav(Direction::Left) => self.selected.saturating_sub(1),
            AppEvent::Nav(Direction::Right) => (self.selected + 1).min(last),
            AppEvent::Nav(Direction::Up) => self.selected.checked_sub(cols).unwrap_or(self.selected),
            AppEvent::Nav(Direction::Down) => {
                if self.selected + cols <= last {
                    self.selected + cols
                } else {
                    self.selected
                }
            }
            AppEvent::PageUp => self.selected.saturating_sub(page),
            AppEvent::PageDown => (self.selected + page).min(last),
            AppEvent::First => 0,
            AppEvent::Last => last,
            _ => return,
        };

        if next != self.selected {
            self.selected = next;
            tracing::debug!(selected = self.selected, "results: selection moved");
        }
    }

    /// Recompute the first visible row so `selected` is on screen.
    fn scroll_into_view(&self, columns: usize, rows: usize) -> usize {
        let sel_row = self.selected / columns;
        let mut top = self.top_row.get();
        if sel_row < top {
            top = sel_row;
        } else if sel_row >= top + rows {
            top = sel_row + 1 - rows;
        }
        self.top_row.set(top);
        self.columns.set(columns);
        self.visible_rows.set(rows);
        top
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultGrid<'a> {
    terms: &'a [OntologyTerm],
    state: &'a ResultGridState,
    focused: bool,
    max_columns: u16,
    theme: &'a Theme,
}

impl<'a> ResultGrid<'a> {
    pub fn new(
        terms: &'a [OntologyTerm],
        state: &'a ResultGridState,
        focused: bool,
        max_columns: u16,
        theme: &'a Theme,
    ) -> Self {
        Self { terms, state, focused, max_columns, theme }
    }
}

impl Widget for ResultGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let title = format!(" Results ({}) ", self.terms.len());
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        // Leave one column for the scrollbar.
        let grid = Rect { width: inner.width.saturating_sub(1), ..inner };
        let columns = (grid.width / MIN_CARD_WIDTH).clamp(1, self.max_columns.max(1)) as usize;
        let rows = (grid.height / CARD_HEIGHT).max(1) as usize;
        let top = self.state.scroll_into_view(columns, rows);

        let card_width = grid.width / columns as u16;
        let first = top * columns;
        let visible = self.terms.iter().enumerate().skip(first).take(columns * rows);

        for (index, term) in visible {
            let slot = index - first;
            let col = (slot % columns) as u16;
            let row = (slot / columns) as u16;
            let card_area = Rect {
                x: grid.x + col * card_width,
                y: grid.y + row * CARD_HEIGHT,
                width: card_width,
                height: CARD_HEIGHT.min(grid.bottom().saturating_sub(grid.y + row * CARD_HEIGHT)),
            };
            let selected = self.focused && index == self.state.selected;
            Card::new(term, selected, self.theme).render(card_area, buf);
        }

        let total_rows = self.terms.len().div_ceil(columns);
        if total_rows > rows {
            let sb_area = Rect {
                x: inner.right().saturating_sub(1),
                width: 1,
                ..inner
            };
            let mut sb_state = ScrollbarState::new(total_rows)
                .position(top)
                .viewport_content_length(rows);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// A single result card. Missing fields render as empty values.
pub struct Card<'a> {
    term: &'a OntologyTerm,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> Card<'a> {
    pub fn new(term: &'a OntologyTerm, selected: bool, theme: &'a Theme) -> Self {
        Self { term, selected, theme }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.selected {
            self.theme.border_selected
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        let [label, iri, description, obo_id] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let t = self.theme;
        Paragraph::new(Span::styled(self.term.label.as_str(), t.card_title)).render(label, buf);
        Paragraph::new(Line::from(vec![
            Span::styled("Latest Article: ", t.card_key),
            Span::styled(self.term.iri.as_str(), t.card_link),
        ]))
        .render(iri, buf);
        Paragraph::new(Line::from(vec![
            Span::styled("Description: ", t.card_key),
            Span::styled(self.term.description.as_str(), t.card_text),
        ]))
        .wrap(Wrap { trim: true })
        .render(description, buf);
        Paragraph::new(Line::from(vec![
            Span::styled("OBO ID: ", t.card_key),
            Span::styled(self.term.obo_id.as_str(), t.card_text),
        ]))
        .render(obo_id, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn terms(n: usize) -> Vec<OntologyTerm> {
        (0..n)
            .map(|i| OntologyTerm::new(format!("term {i}"), format!("http://x/{i}"), "", ""))
            .collect()
    }

    fn rows_of(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| (area.left()..area.right()).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    /// Render once so the state learns the grid geometry.
    fn layout(state: &ResultGridState, terms: &[OntologyTerm], width: u16, height: u16) -> Buffer {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        ResultGrid::new(terms, state, true, 3, &theme).render(area, &mut buf);
        buf
    }

    #[test]
    fn single_card_shows_all_four_fields() {
        let theme = Theme::load_default();
        let term = OntologyTerm::new("Cancer", "http://x", "d", "MONDO:123");
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        Card::new(&term, false, &theme).render(area, &mut buf);

        let rows = rows_of(&buf);
        assert!(rows[1].contains("Cancer"));
        assert!(rows[2].contains("Latest Article: http://x"));
        assert!(rows[3].contains("Description: d"));
        assert!(rows[5].contains("OBO ID: MONDO:123"));
    }

    #[test]
    fn missing_fields_render_empty() {
        let theme = Theme::load_default();
        let term = OntologyTerm::new("Gout", "http://g", "", "");
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        Card::new(&term, false, &theme).render(area, &mut buf);

        let rows = rows_of(&buf);
        assert_eq!(rows[5].trim_end_matches(['│', ' ']), "│OBO ID:");
    }

    #[test]
    fn grid_renders_one_card_per_term() {
        let state = ResultGridState::default();
        let list = terms(4);
        let text = rows_of(&layout(&state, &list, 100, 30)).join("\n");
        for t in &list {
            assert!(text.contains(&t.label), "missing {}", t.label);
        }
        assert!(text.contains("Results (4)"));
    }

    #[test]
    fn navigation_moves_by_cell_and_row() {
        let mut state = ResultGridState::default();
        let list = terms(10);
        layout(&state, &list, 100, 2 * CARD_HEIGHT + 2);
        // 100 wide → 3 columns, 2 visible rows.

        state.handle(&AppEvent::Nav(Direction::Right), list.len());
        assert_eq!(state.selected, 1);
        state.handle(&AppEvent::Nav(Direction::Down), list.len());
        assert_eq!(state.selected, 4);
        state.handle(&AppEvent::Nav(Direction::Up), list.len());
        assert_eq!(state.selected, 1);
        state.handle(&AppEvent::Nav(Direction::Up), list.len());
        assert_eq!(state.selected, 1, "top row stays put");
        state.handle(&AppEvent::PageDown, list.len());
        assert_eq!(state.selected, 7);
        state.handle(&AppEvent::Last, list.len());
        assert_eq!(state.selected, 9);
        state.handle(&AppEvent::Nav(Direction::Down), list.len());
        assert_eq!(state.selected, 9, "no row below the last card");
        state.handle(&AppEvent::First, list.len());
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn selection_scrolls_into_view() {
        let mut state = ResultGridState::default();
        let list = terms(12);
        layout(&state, &list, 100, CARD_HEIGHT + 2);
        state.handle(&AppEvent::Last, list.len());

        let text = rows_of(&layout(&state, &list, 100, CARD_HEIGHT + 2)).join("\n");
        assert!(text.contains("term 11"));
        assert!(!text.contains("term 0 "));
    }

    #[test]
    fn reset_returns_to_first_card() {
        let mut state = ResultGridState::default();
        state.handle(&AppEvent::Last, 5);
        state.reset();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn empty_result_set_ignores_navigation() {
        let mut state = ResultGridState::default();
        state.handle(&AppEvent::Last, 0);
        assert_eq!(state.selected, 0);
    }
}
