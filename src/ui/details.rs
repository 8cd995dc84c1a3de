use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::app::DetailsScreen;

/// Account profile view showing stats, bio, and contact info.
pub struct ProfileView<'a> {
    pub screen: &'a DetailsScreen,
}

impl<'a> ProfileView<'a> {
    pub fn new(screen: &'a DetailsScreen) -> Self {
        Self { screen }
    }
}

impl Widget for ProfileView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.screen.pipeline.state().get();
        let profile = state.data;

        let login = self
            .screen
            .account
            .as_ref()
            .map(|a| a.login.clone())
            .or_else(|| profile.as_ref().map(|p| p.login.clone()))
            .unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" @{login} "))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(ref error) = state.error {
            buf.set_string(
                inner.x + 1,
                inner.y,
                format!("Error: {error} (press r to retry)"),
                Style::default().fg(Color::Red),
            );
            return;
        }

        // Covers both the loading phase and an entry nothing has been
        // fetched for yet.
        let Some(profile) = profile else {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "Loading profile...",
                Style::default().fg(Color::DarkGray),
            );
            return;
        };

        let [info_area, bio_area] =
            Layout::vertical([Constraint::Length(10), Constraint::Min(1)]).areas(inner);

        // -- Info section --
        let mut lines = Vec::new();

        let name_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        lines.push(Line::from(vec![
            Span::styled(
                profile.name.clone().unwrap_or_else(|| profile.login.clone()),
                name_style,
            ),
            Span::styled(
                format!("  {}", profile.kind),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        lines.push(Line::from(Span::styled(
            format!("@{}", profile.login),
            Style::default().fg(Color::DarkGray),
        )));

        lines.push(Line::from(""));

        // Metrics
        let dim = Style::default().fg(Color::DarkGray);
        lines.push(Line::from(vec![
            Span::styled(format_count(profile.followers), name_style),
            Span::styled(" Followers  ", dim),
            Span::styled(format_count(profile.following), name_style),
            Span::styled(" Following  ", dim),
            Span::styled(format_count(profile.public_repos as u64), name_style),
            Span::styled(" Repos  ", dim),
            Span::styled(format_count(profile.public_gists as u64), name_style),
            Span::styled(" Gists", dim),
        ]));

        if let Some(ref company) = profile.company {
            lines.push(Line::from(vec![
                Span::styled("\u{1F3E2} ", Style::default().fg(Color::Blue)),
                Span::raw(company.as_str()),
            ]));
        }

        if let Some(ref location) = profile.location {
            lines.push(Line::from(vec![
                Span::styled("\u{1F4CD} ", Style::default().fg(Color::Red)),
                Span::raw(location.as_str()),
            ]));
        }

        if let Some(blog) = profile.blog.as_ref().filter(|b| !b.is_empty()) {
            lines.push(Line::from(vec![
                Span::styled("\u{1F517} ", Style::default().fg(Color::Blue)),
                Span::styled(blog.as_str(), Style::default().fg(Color::Blue)),
            ]));
        }

        if let Some(ref email) = profile.email {
            lines.push(Line::from(vec![
                Span::styled("\u{2709} ", dim),
                Span::raw(email.as_str()),
            ]));
        }

        if let Some(ref handle) = profile.twitter_username {
            lines.push(Line::from(vec![
                Span::styled("\u{1D54F} ", dim),
                Span::raw(format!("@{handle}")),
            ]));
        }

        if let Some(ref dt) = profile.created_at {
            lines.push(Line::from(vec![
                Span::styled("\u{1F4C5} Joined ", dim),
                Span::styled(dt.format("%B %Y").to_string(), dim),
            ]));
        }

        let info_para = Paragraph::new(lines);
        info_para.render(info_area, buf);

        // -- Bio section --
        if let Some(ref bio) = profile.bio {
            let bio_block = Block::default()
                .borders(Borders::TOP)
                .title(" Bio ")
                .title_style(Style::default().fg(Color::DarkGray))
                .border_style(Style::default().fg(Color::DarkGray));

            let bio_inner = bio_block.inner(bio_area);
            bio_block.render(bio_area, buf);

            let bio_para = Paragraph::new(bio.as_str()).wrap(Wrap { trim: true });
            bio_para.render(bio_inner, buf);
        }
    }
}

fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_count;

    #[test]
    fn formats_counts_compactly() {
        assert_eq!(format_count(8), "8");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(2_300_000), "2.3M");
    }
}
