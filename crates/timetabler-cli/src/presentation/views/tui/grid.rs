use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};
use timetabler_engine::{CellView, GridView};

const PERIOD_COLUMN_WIDTH: u16 = 14;
const ROW_HEIGHT: u16 = 3;

/// Week grid: a period column followed by one column per day.
pub struct GridWidget<'a> {
    grid: &'a GridView,
    title: &'a str,
}

impl<'a> GridWidget<'a> {
    pub fn new(grid: &'a GridView, title: &'a str) -> Self {
        Self { grid, title }
    }

    fn cell(view: &CellView) -> Cell<'static> {
        let highlight = Style::default().bg(Color::Blue).fg(Color::White);
        match view {
            CellView::Empty => Cell::from(""),
            CellView::AddNew => Cell::from(Text::from(vec![
                Line::from(""),
                Line::from("+ Add new"),
            ]))
            .style(highlight),
            CellView::Period {
                subject,
                teacher,
                room,
                highlighted,
            } => {
                let text = Text::from(vec![
                    Line::from(subject.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                    Line::from(teacher.clone()),
                    Line::from(format!("Room {}", room)),
                ]);
                let cell = Cell::from(text);
                if *highlighted {
                    cell.style(highlight)
                } else {
                    cell
                }
            }
        }
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(
            std::iter::once(Cell::from("Period"))
                .chain(self.grid.days.iter().map(|d| Cell::from(d.clone()))),
        )
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

        let rows = self.grid.rows.iter().map(|row| {
            let label = Cell::from(Text::from(vec![
                Line::from(row.name.clone()),
                Line::from(row.start.clone()),
                Line::from(row.end.clone()),
            ]))
            .style(Style::default().fg(Color::Cyan));
            Row::new(std::iter::once(label).chain(row.cells.iter().map(Self::cell)))
                .height(ROW_HEIGHT)
        });

        let mut widths = vec![Constraint::Length(PERIOD_COLUMN_WIDTH)];
        widths.extend(self.grid.days.iter().map(|_| Constraint::Fill(1)));

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::views::tui::test_support::contains;
    use timetabler_engine::GridRowView;

    fn grid() -> GridView {
        let mut cells = vec![CellView::Empty; 5];
        cells[2] = CellView::Period {
            subject: "Maths".to_string(),
            teacher: "Smith".to_string(),
            room: "204".to_string(),
            highlighted: false,
        };
        cells[4] = CellView::AddNew;
        GridView {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            rows: vec![GridRowView {
                name: "Period 1".to_string(),
                start: "09:00".to_string(),
                end: "09:45".to_string(),
                cells,
            }],
        }
    }

    #[test]
    fn test_grid_shows_days_periods_and_cells() {
        let area = Rect::new(0, 0, 90, 12);
        let mut buf = Buffer::empty(area);
        GridWidget::new(&grid(), "Year 10").render(area, &mut buf);

        for needle in ["Year 10", "Monday", "Friday", "Period 1", "09:00", "Maths", "Smith", "Room 204", "+ Add new"] {
            assert!(contains(&buf, needle), "missing {needle}");
        }
    }
}
