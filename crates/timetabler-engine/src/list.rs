//! Scrollable selection list shared by every menu screen.

use crate::field::FieldId;

/// What activating a row does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction<C> {
    /// Leave the whole screen
    Exit,
    /// Return to the previous state of the screen
    Back,
    /// The row is an inline field editor; keys edit the field
    SetField(FieldId),
    /// Screen-specific command
    Invoke(C),
    /// Non-interactive heading
    Label,
}

impl<C> RowAction<C> {
    pub fn tag(&self) -> RowTag {
        match self {
            RowAction::SetField(_) => RowTag::Editor,
            RowAction::Label => RowTag::Label,
            RowAction::Exit | RowAction::Back | RowAction::Invoke(_) => RowTag::Action,
        }
    }
}

/// Rendering hint for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTag {
    Editor,
    Action,
    Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow<C> {
    pub label: String,
    pub action: RowAction<C>,
}

impl<C> MenuRow<C> {
    pub fn new(label: impl Into<String>, action: RowAction<C>) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    pub fn field(label: impl Into<String>, field: FieldId) -> Self {
        Self::new(label, RowAction::SetField(field))
    }

    pub fn invoke(label: impl Into<String>, command: C) -> Self {
        Self::new(label, RowAction::Invoke(command))
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self::new(label, RowAction::Label)
    }
}

/// Row appended after the caller's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Exit,
    Back,
}

impl Sentinel {
    fn row<C>(self) -> MenuRow<C> {
        match self {
            Sentinel::Exit => MenuRow::new("Exit", RowAction::Exit),
            Sentinel::Back => MenuRow::new("Back", RowAction::Back),
        }
    }
}

/// Receives the visible part of a [`MenuList`].
pub trait RowSink {
    fn row(&mut self, index: usize, label: &str, tag: RowTag, highlighted: bool);

    /// `hidden` rows are scrolled off above the viewport
    fn more_above(&mut self, _hidden: usize) {}

    /// `hidden` rows are scrolled off below the viewport
    fn more_below(&mut self, _hidden: usize) {}
}

/// Ordered rows with one selected row and a fixed-height viewport.
///
/// The last row is always the sentinel, so the list is never empty and
/// `viewport_top <= selected < viewport_top + viewport_height` holds after
/// every operation.
#[derive(Debug, Clone)]
pub struct MenuList<C> {
    title: String,
    rows: Vec<MenuRow<C>>,
    sentinel: Sentinel,
    selected: usize,
    viewport_top: usize,
    viewport_height: usize,
}

impl<C> MenuList<C> {
    pub fn new(
        title: impl Into<String>,
        rows: Vec<MenuRow<C>>,
        sentinel: Sentinel,
        viewport_height: usize,
    ) -> Self {
        let mut list = Self {
            title: title.into(),
            rows: Vec::new(),
            sentinel,
            selected: 0,
            viewport_top: 0,
            viewport_height: viewport_height.max(1),
        };
        list.set_rows(rows);
        list
    }

    /// Replace the caller's rows, keeping the selection index where possible.
    pub fn set_rows(&mut self, mut rows: Vec<MenuRow<C>>) {
        rows.push(self.sentinel.row());
        self.rows = rows;
        self.selected = self.selected.min(self.last_index());
        self.follow_selection();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Move the selection by `delta` rows, clamped to the list.
    pub fn move_by(&mut self, delta: isize) {
        let target = (self.selected as isize).saturating_add(delta);
        self.selected = target.clamp(0, self.last_index() as isize) as usize;
        self.follow_selection();
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.last_index());
        self.follow_selection();
    }

    /// Select the first row whose action satisfies `pred`.
    pub fn select_where(&mut self, pred: impl Fn(&RowAction<C>) -> bool) {
        if let Some(index) = self.rows.iter().position(|row| pred(&row.action)) {
            self.select(index);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[MenuRow<C>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; the sentinel row is always present.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn current_row(&self) -> &MenuRow<C> {
        &self.rows[self.selected]
    }

    pub fn current_action(&self) -> &RowAction<C> {
        &self.current_row().action
    }

    pub fn current_tag(&self) -> RowTag {
        self.current_action().tag()
    }

    /// Field under the selection, if the selected row is an editor.
    pub fn current_field(&self) -> Option<FieldId> {
        match self.current_action() {
            RowAction::SetField(field) => Some(*field),
            _ => None,
        }
    }

    /// Feed the rows inside the viewport to `sink`.
    pub fn render<S: RowSink + ?Sized>(&self, sink: &mut S) {
        let end = (self.viewport_top + self.viewport_height).min(self.rows.len());
        if self.viewport_top > 0 {
            sink.more_above(self.viewport_top);
        }
        for index in self.viewport_top..end {
            let row = &self.rows[index];
            sink.row(index, &row.label, row.action.tag(), index == self.selected);
        }
        if end < self.rows.len() {
            sink.more_below(self.rows.len() - end);
        }
    }

    fn last_index(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    fn follow_selection(&mut self) {
        if self.selected < self.viewport_top {
            self.viewport_top = self.selected;
        } else if self.selected >= self.viewport_top + self.viewport_height {
            self.viewport_top = self.selected + 1 - self.viewport_height;
        }
        // keep the window filled after the list shrank
        let max_top = self.rows.len().saturating_sub(self.viewport_height);
        self.viewport_top = self.viewport_top.min(max_top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize, height: usize) -> MenuList<usize> {
        let rows = (0..count)
            .map(|i| MenuRow::invoke(format!("Row {}", i), i))
            .collect();
        MenuList::new("Numbers", rows, Sentinel::Back, height)
    }

    fn assert_window(list: &MenuList<usize>) {
        assert!(list.selected() < list.len());
        assert!(list.viewport_top() <= list.selected());
        assert!(list.selected() < list.viewport_top() + list.viewport_height());
    }

    #[derive(Default)]
    struct Recorder {
        rows: Vec<(usize, String, bool)>,
        above: usize,
        below: usize,
    }

    impl RowSink for Recorder {
        fn row(&mut self, index: usize, label: &str, _tag: RowTag, highlighted: bool) {
            self.rows.push((index, label.to_string(), highlighted));
        }

        fn more_above(&mut self, hidden: usize) {
            self.above = hidden;
        }

        fn more_below(&mut self, hidden: usize) {
            self.below = hidden;
        }
    }

    #[test]
    fn test_sentinel_is_appended() {
        let list = numbered(0, 5);
        assert_eq!(list.len(), 1);
        assert_eq!(list.current_action(), &RowAction::Back);
        assert_eq!(list.current_row().label, "Back");

        let exit: MenuList<()> = MenuList::new("Main", Vec::new(), Sentinel::Exit, 5);
        assert_eq!(exit.current_action(), &RowAction::Exit);
    }

    #[test]
    fn test_move_clamps_at_both_ends() {
        let mut list = numbered(3, 10);
        list.move_by(-1);
        assert_eq!(list.selected(), 0);
        list.move_by(100);
        assert_eq!(list.selected(), 3);
        list.move_by(isize::MAX);
        assert_eq!(list.selected(), 3);
        list.move_by(isize::MIN);
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn test_viewport_follows_selection() {
        let mut list = numbered(20, 5);
        list.move_by(4);
        assert_eq!(list.viewport_top(), 0);
        list.move_by(1);
        assert_eq!(list.selected(), 5);
        assert_eq!(list.viewport_top(), 1);
        list.move_by(10);
        assert_eq!(list.viewport_top(), 11);
        list.move_by(-12);
        assert_eq!(list.selected(), 3);
        assert_eq!(list.viewport_top(), 3);
    }

    #[test]
    fn test_window_invariant_holds_for_move_sequences() {
        let deltas = [3, -1, 7, 7, -20, 1, 1, 1, 15, -4, 2, -2, 30, -30, 5];
        for height in 1..8 {
            for count in 0..25 {
                let mut list = numbered(count, height);
                for delta in deltas {
                    list.move_by(delta);
                    assert_window(&list);
                }
            }
        }
    }

    #[test]
    fn test_set_rows_clamps_selection() {
        let mut list = numbered(10, 4);
        list.move_by(9);
        assert_eq!(list.selected(), 9);

        list.set_rows(vec![MenuRow::invoke("Only", 0)]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.selected(), 1);
        assert_eq!(list.viewport_top(), 0);
        assert_window(&list);
    }

    #[test]
    fn test_render_reports_hidden_rows() {
        let mut list = numbered(10, 3);
        list.select(5);

        let mut recorder = Recorder::default();
        list.render(&mut recorder);

        let indices: Vec<usize> = recorder.rows.iter().map(|r| r.0).collect();
        assert_eq!(indices, vec![3, 4, 5]);
        assert_eq!(recorder.above, 3);
        assert_eq!(recorder.below, 5);
        assert_eq!(recorder.rows[2], (5, "Row 5".to_string(), true));
    }

    #[test]
    fn test_tags() {
        let rows = vec![
            MenuRow::label("Heading"),
            MenuRow::field("Room: ", FieldId::Room),
            MenuRow::invoke("Go", 1),
        ];
        let mut list = MenuList::new("Tags", rows, Sentinel::Back, 10);
        assert_eq!(list.current_tag(), RowTag::Label);
        list.move_by(1);
        assert_eq!(list.current_tag(), RowTag::Editor);
        assert_eq!(list.current_field(), Some(FieldId::Room));
        list.move_by(1);
        assert_eq!(list.current_tag(), RowTag::Action);
        assert_eq!(list.current_field(), None);
    }

    #[test]
    fn test_select_where() {
        let mut list = numbered(5, 2);
        list.select_where(|action| action == &RowAction::Invoke(3));
        assert_eq!(list.selected(), 3);
        assert_window(&list);

        list.select_where(|action| action == &RowAction::Invoke(42));
        assert_eq!(list.selected(), 3);
    }
}
