pub mod accounts;
pub mod details;
pub mod help;
pub mod input;
pub mod search;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::{App, AppMode, Screen};

use accounts::AccountList;
use details::ProfileView;
use help::HelpView;
use input::TextInput;
use search::SearchView;
use status_bar::StatusBar;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: main content + status bar + command bar while typing a command
    let bottom_height = if app.mode == AppMode::Command { 2 } else { 1 };

    let [main_area, bottom_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(bottom_height)]).areas(area);

    if app.mode == AppMode::Command {
        let [status_area, cmd_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(bottom_area);
        frame.render_widget(StatusBar::new(app), status_area);
        frame.render_widget(
            TextInput::new(":", &app.command_input).focused(true),
            cmd_area,
        );
    } else {
        frame.render_widget(StatusBar::new(app), bottom_area);
    }

    match app.current_screen() {
        Some(Screen::Help) => {
            // Render the view underneath first, then overlay the help panel.
            let beneath = app
                .stack
                .len()
                .checked_sub(2)
                .and_then(|idx| app.stack.get(idx));
            render_screen(frame, app, beneath, main_area);
            frame.render_widget(HelpView::new(), main_area);
        }
        screen => render_screen(frame, app, screen, main_area),
    }
}

fn render_screen(
    frame: &mut Frame,
    app: &App,
    screen: Option<&Screen>,
    area: ratatui::layout::Rect,
) {
    match screen {
        None => {
            frame.render_widget(SearchView::new(app), area);
        }
        Some(Screen::Details(details)) => {
            frame.render_widget(ProfileView::new(details), area);
        }
        Some(Screen::Followers(list)) => {
            let state = list.pipeline.state().get();
            let title = format!("Followers of {}", list.login);
            frame.render_widget(
                AccountList::new(&title, &state)
                    .selected(list.selected_index)
                    .empty_hint("No followers"),
                area,
            );
        }
        Some(Screen::Following(list)) => {
            let state = list.pipeline.state().get();
            let title = format!("Following of {}", list.login);
            frame.render_widget(
                AccountList::new(&title, &state)
                    .selected(list.selected_index)
                    .empty_hint("Not following anyone"),
                area,
            );
        }
        Some(Screen::Help) => {}
    }
}
