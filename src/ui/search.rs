use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Widget;

use crate::app::{App, AppMode};
use crate::ui::accounts::AccountList;
use crate::ui::input::TextInput;

/// Search view: the query input field above the result list.
pub struct SearchView<'a> {
    pub app: &'a App,
}

impl<'a> SearchView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for SearchView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [input_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);

        let input = self.app.search.pipeline.input().get();
        let state = self.app.search.pipeline.state().get();

        TextInput::new(" Search: ", &input)
            .focused(self.app.mode == AppMode::Insert)
            .render(input_area, buf);

        let min_len = self.app.config.min_query_len;
        let hint = if input.chars().count() < min_len {
            format!("Type at least {min_len} characters to search (press / to edit)")
        } else {
            "No accounts found".to_string()
        };

        AccountList::new("GitHub Accounts", &state)
            .selected(self.app.search.selected_index)
            .empty_hint(&hint)
            .render(list_area, buf);
    }
}
