//! Whole-frame layout: header, body, status bar and an optional popup.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
};
use timetabler_engine::{ScreenBody, ScreenView};

use super::{GridWidget, MenuWidget, PopupWidget, StatusBarWidget};

pub struct ScreenWidget<'a> {
    view: &'a ScreenView,
}

impl<'a> ScreenWidget<'a> {
    pub fn new(view: &'a ScreenView) -> Self {
        Self { view }
    }
}

impl Widget for ScreenWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

        Paragraph::new(Span::styled(
            format!("timetabler | {}", self.view.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .render(chunks[0], buf);

        match &self.view.body {
            ScreenBody::Grid(grid) => GridWidget::new(grid, &self.view.title).render(chunks[1], buf),
            ScreenBody::List(list) => MenuWidget::new(list).render(chunks[1], buf),
        }

        StatusBarWidget::new(self.view.status.as_deref(), &self.view.shortcuts)
            .render(chunks[2], buf);

        if let Some(notice) = &self.view.popup {
            PopupWidget::new(notice).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::views::tui::test_support::{buffer_lines, contains};
    use timetabler_engine::{ListRowView, ListView, Notice, RowTag};

    fn view(popup: Option<Notice>) -> ScreenView {
        ScreenView {
            title: "Main Menu".to_string(),
            body: ScreenBody::List(ListView {
                title: "Main Menu".to_string(),
                rows: vec![ListRowView {
                    index: 0,
                    label: "Open Existing".to_string(),
                    tag: RowTag::Action,
                    highlighted: true,
                }],
                hidden_above: 0,
                hidden_below: 0,
            }),
            shortcuts: "[q] Quit".to_string(),
            status: Some("Saved".to_string()),
            popup,
        }
    }

    #[test]
    fn test_layout() {
        let area = Rect::new(0, 0, 90, 30);
        let mut buf = Buffer::empty(area);
        ScreenWidget::new(&view(None)).render(area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines[0].starts_with("timetabler | Main Menu"));
        assert!(contains(&buf, "> 1. Open Existing"));
        assert!(lines[28].contains("Saved"));
        assert!(lines[28].contains("[q] Quit"));
    }

    #[test]
    fn test_popup_overlays_body() {
        let area = Rect::new(0, 0, 90, 30);
        let mut buf = Buffer::empty(area);
        let notice = Notice::warning("Cannot open timetable", "bad.json");
        ScreenWidget::new(&view(Some(notice))).render(area, &mut buf);
        assert!(contains(&buf, "Cannot open timetable"));
    }
}
