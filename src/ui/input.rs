use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// A simple single-line text input renderer.
///
/// Renders the prompt + text content, with a cursor indicator while focused.
pub struct TextInput<'a> {
    pub prompt: &'a str,
    pub text: &'a str,
    pub focused: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(prompt: &'a str, text: &'a str) -> Self {
        Self {
            prompt,
            text,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let cursor = if self.focused { "\u{2588}" } else { "" };
        let display = format!("{}{}{}", self.prompt, self.text, cursor);
        let max_width = area.width as usize;
        // If the display is wider than the area, show the rightmost portion.
        let visible = if display.chars().count() > max_width {
            let skip = display.chars().count() - max_width;
            display.chars().skip(skip).collect::<String>()
        } else {
            display
        };

        let style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        buf.set_string(area.x, area.y, visible, style);
    }
}
