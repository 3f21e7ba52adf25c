//! Featured-diseases panel, shown while there is no active query.

use crate::theme::Theme;
use dox_core::featured::{FeaturedDisease, FEATURED, INTRO};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::Span,
    widgets::{Block, Paragraph, Widget, Wrap},
};

const CARD_HEIGHT: u16 = 6;

pub struct FeaturedPanel<'a> {
    columns: u16,
    theme: &'a Theme,
}

impl<'a> FeaturedPanel<'a> {
    pub fn new(columns: u16, theme: &'a Theme) -> Self {
        Self { columns: columns.max(1), theme }
    }
}

impl Widget for FeaturedPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Featured ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        let [intro, grid] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(inner);

        Paragraph::new(INTRO)
            .style(self.theme.card_text)
            .wrap(Wrap { trim: true })
            .render(intro, buf);

        let columns = self.columns.min(FEATURED.len() as u16);
        let card_width = grid.width / columns;
        for (i, disease) in FEATURED.iter().enumerate() {
            let col = i as u16 % columns;
            let row = i as u16 / columns;
            let y = grid.y + row * CARD_HEIGHT;
            if y >= grid.bottom() {
                break;
            }
            let card = Rect {
                x: grid.x + col * card_width,
                y,
                width: card_width,
                height: CARD_HEIGHT.min(grid.bottom() - y),
            };
            render_card(disease, i, self.theme, card, buf);
        }
    }
}

fn render_card(disease: &FeaturedDisease, index: usize, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let accent = theme.featured_style(index);
    let block = Block::bordered()
        .border_style(accent)
        .title(Span::styled(disease.name, accent.add_modifier(Modifier::BOLD)));
    let inner = block.inner(area);
    block.render(area, buf);

    Paragraph::new(disease.summary)
        .style(theme.card_text)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}
