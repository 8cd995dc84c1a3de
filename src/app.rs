use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::api::GithubClient;
use crate::api::types::Account;
use crate::command::{self, Command};
use crate::config::AppConfig;
use crate::event::{AppEvent, Event, EventHandler, ViewKind};
use crate::navigation;
use crate::pipeline::{ListPipeline, ProfilePipeline, SearchPipeline};
use crate::ui;

// ---------------------------------------------------------------------------
// App mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing into the search field; every keystroke feeds the pipeline.
    Insert,
    Command,
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// The root screen. Lives for the whole session.
pub struct SearchScreen {
    pub pipeline: SearchPipeline,
    pub selected_index: usize,
}

/// Account details. The identity comes from the decoded navigation
/// argument (when navigated from a list); the extended profile is fetched
/// on entry.
pub struct DetailsScreen {
    pub account: Option<Account>,
    pub pipeline: ProfilePipeline,
}

/// Followers or following of a fixed account.
pub struct ListScreen {
    pub id: u64,
    pub login: String,
    pub pipeline: ListPipeline,
    pub selected_index: usize,
}

/// A screen pushed above the search root. Popping one drops it, which
/// cancels any in-flight work its pipeline owns.
pub enum Screen {
    Details(DetailsScreen),
    Followers(ListScreen),
    Following(ListScreen),
    Help,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub config: AppConfig,
    client: Arc<GithubClient>,

    // View system
    pub search: SearchScreen,
    pub stack: Vec<Screen>,
    pub mode: AppMode,

    // Input state
    pub command_input: String,

    // Status
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, client: Arc<GithubClient>) -> Self {
        let pipeline = SearchPipeline::github(
            Arc::clone(&client),
            config.per_page,
            config.debounce(),
            config.min_query_len,
        );

        Self {
            running: true,
            events: EventHandler::new(config.tick_rate_fps),
            config,
            client,
            search: SearchScreen {
                pipeline,
                selected_index: 0,
            },
            stack: Vec::new(),
            mode: AppMode::Normal,
            command_input: String::new(),
            status_message: None,
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            match self.events.next().await? {
                Event::Tick => {}
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key) = event
                        && key.kind == crossterm::event::KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Event::App(app_event) => self.handle_app_event(app_event),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        ui::draw(frame, self);
    }

    // -- View stack ---------------------------------------------------------

    pub fn current_screen(&self) -> Option<&Screen> {
        self.stack.last()
    }

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Insert => self.handle_insert_key(key),
            AppMode::Command => self.handle_command_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.stack.is_empty() {
                    self.events.send(AppEvent::Quit);
                } else {
                    self.events.send(AppEvent::PopView);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Enter => {
                self.open_selected();
            }
            KeyCode::Char('/') if self.stack.is_empty() => {
                self.mode = AppMode::Insert;
            }
            KeyCode::Char(':') => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }
            KeyCode::Char('?') => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            KeyCode::Char('r') => {
                self.refresh_current();
            }
            KeyCode::Char('f') => {
                if let Some(kind) = self.follow_view_for_details(true) {
                    self.events.send(AppEvent::PushView(kind));
                }
            }
            KeyCode::Char('g') => {
                if let Some(kind) = self.follow_view_for_details(false) {
                    self.events.send(AppEvent::PushView(kind));
                }
            }
            KeyCode::Char('o') => {
                self.open_profile_in_browser();
            }
            _ => {}
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                let mut text = self.search.pipeline.input().get();
                text.pop();
                self.search.selected_index = 0;
                self.search.pipeline.on_query_changed(text);
            }
            KeyCode::Char(c) => {
                let mut text = self.search.pipeline.input().get();
                text.push(c);
                self.search.selected_index = 0;
                self.search.pipeline.on_query_changed(text);
            }
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                self.execute_command();
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(c) => {
                self.command_input.push(c);
            }
            _ => {}
        }
    }

    // -- Command execution --------------------------------------------------

    fn execute_command(&mut self) {
        let input = self.command_input.clone();
        match command::parse_command(&input) {
            Some(Command::Search(query)) => {
                // A typed search always lands on the root screen.
                self.stack.clear();
                self.search.selected_index = 0;
                self.search.pipeline.on_query_changed(query);
            }
            Some(Command::User(id)) => {
                self.events.send(AppEvent::PushView(ViewKind::DetailsById(id)));
            }
            Some(Command::Followers(id)) => {
                self.events.send(AppEvent::PushView(ViewKind::Followers {
                    id,
                    login: format!("#{id}"),
                }));
            }
            Some(Command::Following(id)) => {
                self.events.send(AppEvent::PushView(ViewKind::Following {
                    id,
                    login: format!("#{id}"),
                }));
            }
            Some(Command::Refresh) => {
                self.refresh_current();
            }
            Some(Command::Help) => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            Some(Command::Quit) => {
                self.events.send(AppEvent::Quit);
            }
            None => {
                self.status_message = Some(format!("Unknown command: {input}"));
            }
        }
        self.command_input.clear();
    }

    // -- Selection helpers --------------------------------------------------

    fn move_selection_down(&mut self) {
        let count = self.current_item_count();
        match self.stack.last_mut() {
            None => {
                if self.search.selected_index + 1 < count {
                    self.search.selected_index += 1;
                }
            }
            Some(Screen::Followers(list)) | Some(Screen::Following(list)) => {
                if list.selected_index + 1 < count {
                    list.selected_index += 1;
                }
            }
            _ => {}
        }
    }

    fn move_selection_up(&mut self) {
        match self.stack.last_mut() {
            None => {
                self.search.selected_index = self.search.selected_index.saturating_sub(1);
            }
            Some(Screen::Followers(list)) | Some(Screen::Following(list)) => {
                list.selected_index = list.selected_index.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn current_item_count(&self) -> usize {
        match self.current_screen() {
            None => self.search.pipeline.state().get().data.len(),
            Some(Screen::Followers(list)) | Some(Screen::Following(list)) => {
                list.pipeline.state().get().data.len()
            }
            Some(Screen::Details(_)) | Some(Screen::Help) => 0,
        }
    }

    /// The account currently highlighted in whichever list is on top.
    fn selected_account(&self) -> Option<Account> {
        match self.current_screen() {
            None => {
                let state = self.search.pipeline.state().get();
                state.data.get(self.search.selected_index).cloned()
            }
            Some(Screen::Followers(list)) | Some(Screen::Following(list)) => {
                let state = list.pipeline.state().get();
                state.data.get(list.selected_index).cloned()
            }
            _ => None,
        }
    }

    fn open_selected(&mut self) {
        let Some(account) = self.selected_account() else {
            return;
        };
        // The account crosses the screen boundary as its nav encoding.
        match navigation::encode_account(&account) {
            Ok(arg) => self.events.send(AppEvent::PushView(ViewKind::Details(arg))),
            Err(e) => self.status_message = Some(format!("Navigation failed: {e}")),
        }
    }

    fn refresh_current(&mut self) {
        match self.stack.last_mut() {
            None => self.search.pipeline.refresh(),
            Some(Screen::Details(details)) => details.pipeline.refresh(),
            Some(Screen::Followers(list)) | Some(Screen::Following(list)) => {
                list.pipeline.refresh()
            }
            Some(Screen::Help) => {}
        }
    }

    fn follow_view_for_details(&self, followers: bool) -> Option<ViewKind> {
        let Some(Screen::Details(details)) = self.current_screen() else {
            return None;
        };
        let (id, login) = match (&details.account, details.pipeline.state().get().data) {
            (Some(account), _) => (account.id, account.login.clone()),
            (None, Some(profile)) => (profile.id, profile.login),
            (None, None) => return None,
        };
        Some(if followers {
            ViewKind::Followers { id, login }
        } else {
            ViewKind::Following { id, login }
        })
    }

    fn open_profile_in_browser(&mut self) {
        let Some(Screen::Details(details)) = self.current_screen() else {
            return;
        };
        let url = details
            .account
            .as_ref()
            .map(|a| a.html_url.clone())
            .or_else(|| details.pipeline.state().get().data.map(|p| p.html_url));
        if let Some(url) = url
            && let Err(e) = open::that(&url)
        {
            self.status_message = Some(format!("Could not open browser: {e}"));
        }
    }

    // -- App event handling -------------------------------------------------

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                self.running = false;
            }
            AppEvent::PushView(kind) => {
                self.push_screen(kind);
            }
            AppEvent::PopView => {
                self.stack.pop();
            }
        }
    }

    fn push_screen(&mut self, kind: ViewKind) {
        match kind {
            ViewKind::Details(arg) => match navigation::decode_account(&arg) {
                Ok(account) => {
                    let id = account.id;
                    let mut pipeline = ProfilePipeline::profile(Arc::clone(&self.client));
                    pipeline.enter(id);
                    self.stack.push(Screen::Details(DetailsScreen {
                        account: Some(account),
                        pipeline,
                    }));
                }
                Err(e) => {
                    self.status_message = Some(format!("Navigation failed: {e}"));
                }
            },
            ViewKind::DetailsById(id) => {
                let mut pipeline = ProfilePipeline::profile(Arc::clone(&self.client));
                pipeline.enter(id);
                self.stack.push(Screen::Details(DetailsScreen {
                    account: None,
                    pipeline,
                }));
            }
            ViewKind::Followers { id, login } => {
                let mut pipeline = ListPipeline::followers(Arc::clone(&self.client));
                pipeline.enter(id);
                self.stack.push(Screen::Followers(ListScreen {
                    id,
                    login,
                    pipeline,
                    selected_index: 0,
                }));
            }
            ViewKind::Following { id, login } => {
                let mut pipeline = ListPipeline::following(Arc::clone(&self.client));
                pipeline.enter(id);
                self.stack.push(Screen::Following(ListScreen {
                    id,
                    login,
                    pipeline,
                    selected_index: 0,
                }));
            }
            ViewKind::Help => {
                self.stack.push(Screen::Help);
            }
        }
    }

    // -- Helpers ------------------------------------------------------------

    /// Whether the screen on top is waiting on the network.
    pub fn is_loading(&self) -> bool {
        match self.current_screen() {
            None => self.search.pipeline.state().get().is_loading,
            Some(Screen::Details(details)) => details.pipeline.state().get().is_loading,
            Some(Screen::Followers(list)) | Some(Screen::Following(list)) => {
                list.pipeline.state().get().is_loading
            }
            Some(Screen::Help) => false,
        }
    }
}
