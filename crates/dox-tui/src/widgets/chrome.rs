//! Header and footer strips framing the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::Line,
    widgets::{Paragraph, Widget},
};

pub const TITLE: &str = "Disease Ontology Exploration";
pub const SUBTITLE: &str = "Exploring the Path to Disease Targets";

/// Hint shown while the results pane has focus.
const RESULTS_HINT: &str = " q:quit  ?:help ";
/// Hint shown while typing, where letters go into the search bar.
const SEARCH_HINT: &str = " Esc:results  Ctrl+c:quit ";

/// Two-line header: the title bar and the subtitle. Keybinding hints for
/// the focused pane are right-aligned on the title row.
pub struct Header<'a> {
    theme: &'a Theme,
    searching: bool,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme, searching: false }
    }

    /// Show the hints that apply while the search bar has focus.
    pub fn searching(mut self, searching: bool) -> Self {
        self.searching = searching;
        self
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_row = Rect { height: 1.min(area.height), ..area };
        buf.set_style(title_row, self.theme.title);
        Paragraph::new(Line::from(TITLE))
            .style(self.theme.title)
            .alignment(Alignment::Center)
            .render(title_row, buf);

        let hint = if self.searching { SEARCH_HINT } else { RESULTS_HINT };
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            self.theme.title.add_modifier(Modifier::DIM),
        );

        if area.height > 1 {
            let sub_row = Rect { y: area.y + 1, height: 1, ..area };
            Paragraph::new(Line::from(SUBTITLE))
                .style(self.theme.subtitle)
                .alignment(Alignment::Center)
                .render(sub_row, buf);
        }
    }
}

/// One-line copyright footer.
pub struct Footer<'a> {
    year: i32,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(year: i32, theme: &'a Theme) -> Self {
        Self { year, theme }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.footer);
        Paragraph::new(format!("© {} {}. All Rights Reserved.", self.year, TITLE))
            .style(self.theme.footer)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
