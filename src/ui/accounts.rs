use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use crate::api::types::Account;
use crate::store::ViewState;

/// A scrollable list of accounts with selection highlight.
///
/// Used by search results, followers, and following.
pub struct AccountList<'a> {
    pub title: &'a str,
    pub state: &'a ViewState<Vec<Account>>,
    pub selected_index: usize,
    pub empty_hint: &'a str,
}

impl<'a> AccountList<'a> {
    pub fn new(title: &'a str, state: &'a ViewState<Vec<Account>>) -> Self {
        Self {
            title,
            state,
            selected_index: 0,
            empty_hint: "Nothing to show",
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = hint;
        self
    }
}

impl Widget for AccountList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(ref error) = self.state.error {
            buf.set_string(
                inner.x + 1,
                inner.y,
                format!("Error: {error}"),
                Style::default().fg(Color::Red),
            );
            return;
        }

        if self.state.is_loading {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "Loading...",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let accounts = &self.state.data;
        if accounts.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                self.empty_hint,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let selected = self.selected_index.min(accounts.len() - 1);
        let start = scroll_start(selected, inner.height as usize);

        let mut y = inner.y;
        for (idx, account) in accounts.iter().enumerate().skip(start) {
            if y >= inner.y + inner.height {
                break;
            }

            let marker = if idx == selected { "> " } else { "  " };
            let login_style = if idx == selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, login_style),
                Span::styled(account.login.clone(), login_style),
                Span::styled(
                    format!("  {}", account.kind),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if account.site_admin {
                spans.push(Span::styled(
                    "  staff",
                    Style::default().fg(Color::Yellow),
                ));
            }
            spans.push(Span::styled(
                format!("  #{}", account.id),
                Style::default().fg(Color::DarkGray),
            ));

            let line = Line::from(spans);
            buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(1));
            y += 1;
        }
    }
}

/// First row index to draw so the selected row stays inside the viewport.
fn scroll_start(selected: usize, viewport_rows: usize) -> usize {
    if viewport_rows == 0 {
        return selected;
    }
    selected.saturating_sub(viewport_rows - 1)
}

#[cfg(test)]
mod tests {
    use super::scroll_start;

    #[test]
    fn stays_at_top_while_selection_fits() {
        assert_eq!(scroll_start(0, 10), 0);
        assert_eq!(scroll_start(9, 10), 0);
    }

    #[test]
    fn advances_once_selection_leaves_the_viewport() {
        assert_eq!(scroll_start(10, 10), 1);
        assert_eq!(scroll_start(25, 10), 16);
    }

    #[test]
    fn degenerate_viewport_pins_to_selection() {
        assert_eq!(scroll_start(5, 0), 5);
    }
}
