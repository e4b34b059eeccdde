use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use timetabler_engine::{ListView, RowTag};

/// Numbered list rows with scroll indicators above and below.
pub struct MenuWidget<'a> {
    list: &'a ListView,
}

impl<'a> MenuWidget<'a> {
    pub fn new(list: &'a ListView) -> Self {
        Self { list }
    }

    fn row_style(tag: RowTag, highlighted: bool) -> Style {
        let base = match tag {
            RowTag::Editor => Style::default().fg(Color::White),
            RowTag::Action => Style::default().fg(Color::Cyan),
            RowTag::Label => Style::default().add_modifier(Modifier::DIM),
        };
        if highlighted {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.list.title))
            .borders(Borders::ALL);

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::with_capacity(self.list.rows.len() + 2);
        if self.list.hidden_above > 0 {
            lines.push(Line::from(Span::styled(
                format!("  ↑ {} more", self.list.hidden_above),
                dim,
            )));
        }
        for row in &self.list.rows {
            let marker = if row.highlighted { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{}{}. {}", marker, row.index + 1, row.label),
                Self::row_style(row.tag, row.highlighted),
            )));
        }
        if self.list.hidden_below > 0 {
            lines.push(Line::from(Span::styled(
                format!("  ↓ {} more", self.list.hidden_below),
                dim,
            )));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
