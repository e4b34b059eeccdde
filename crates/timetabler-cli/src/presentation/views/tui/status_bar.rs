//! Bottom bar: transient status on the left, key reference on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use timetabler_engine::StatusLevel;

use super::status_level_to_color;

pub struct StatusBarWidget<'a> {
    status: Option<&'a str>,
    shortcuts: &'a str,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(status: Option<&'a str>, shortcuts: &'a str) -> Self {
        Self { status, shortcuts }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner);

        if let Some(status) = self.status {
            let color = status_level_to_color(StatusLevel::Success);
            Paragraph::new(Span::styled(status, Style::default().fg(color))).render(chunks[0], buf);
        }

        // "[key] action" pairs with the bracketed part highlighted
        let mut spans = Vec::new();
        for part in self.shortcuts.split("  ") {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            match part.split_once(' ') {
                Some((key, action)) => {
                    spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
                    spans.push(Span::raw(" "));
                    spans.push(Span::raw(action));
                }
                None => spans.push(Span::styled(part, Style::default().fg(Color::Yellow))),
            }
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}
