use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use timetabler_engine::Notice;

use super::status_level_to_color;

/// Centered message box; the caller passes the full screen area.
pub struct PopupWidget<'a> {
    notice: &'a Notice,
}

impl<'a> PopupWidget<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }

    fn area(&self, screen: Rect) -> Rect {
        let width = screen.width.min(60);
        let text_width = width.saturating_sub(4).max(1) as usize;
        let wrapped = self.notice.message.len().div_ceil(text_width).max(1) as u16;
        // borders, blank line and footer
        let height = (wrapped + 4).min(screen.height);
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for PopupWidget<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let area = self.area(screen);
        let color = status_level_to_color(self.notice.level);

        Clear.render(area, buf);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.notice.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let text = vec![
            Line::from(self.notice.message.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to continue",
                Style::default().add_modifier(Modifier::DIM),
            ))
            .alignment(Alignment::Center),
        ];
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
