use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

/// Centered key-binding overlay.
pub struct HelpView;

impl HelpView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}

const BINDINGS: &[(&str, &str)] = &[
    ("/", "edit the search query"),
    ("j / k", "move selection"),
    ("Enter", "open the selected account"),
    ("f", "followers of the shown account"),
    ("g", "following of the shown account"),
    ("r", "refresh the current view"),
    ("o", "open profile in browser"),
    (":", "command bar (:search, :user, :quit, ...)"),
    ("q / Esc", "back / quit"),
];

impl Widget for HelpView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = (BINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));

        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(x, y, width, height);

        Clear.render(panel, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(panel);
        block.render(panel, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {key:<8}"),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*what),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
