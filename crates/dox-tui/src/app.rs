//! Top-level application state and the main event loop.
//!
//! [`App::run`] starts a tokio runtime for the search session, sets up the
//! terminal, drives the crossterm event loop, and tears everything down
//! cleanly on exit or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        chrome::{Footer, Header},
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        result_grid::ResultGridState,
        results::ResultsPane,
        search_bar::{SearchBar, SearchBarState},
    },
};
use chrono::Datelike;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dox_core::{config::Config, session::SearchSession, SearchState};
use dox_ols::OlsClient;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::watch;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub search_bar: SearchBarState,
    pub grid: ResultGridState,
    /// Latest snapshot received from the search session.
    pub search: SearchState,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Copyright year shown in the footer, fixed at startup.
    pub year: i32,
    /// The search bar text changed and has not been forwarded yet.
    pub query_dirty: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            focus: Focus::Search,
            prev_focus: Focus::Search,
            search_bar: SearchBarState::default(),
            grid: ResultGridState::default(),
            search: SearchState::default(),
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            year: chrono::Local::now().year(),
            query_dirty: false,
            quit: false,
        }
    }

    /// Take the raw query if it changed since the last call.
    pub fn take_query(&mut self) -> Option<String> {
        if std::mem::take(&mut self.query_dirty) {
            Some(self.search_bar.query.clone())
        } else {
            None
        }
    }

    /// Install a new search snapshot. The card selection goes back to the
    /// top whenever a new query has been committed.
    pub fn apply_search(&mut self, next: SearchState) {
        if next.generation() != self.search.generation() {
            self.grid.reset();
        }
        self.search = next;
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                            execute_command(self, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                        }
                        Err(msg) => {
                            self.command_bar.error = Some(msg);
                        }
                    }
                }
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus == Focus::Results => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus == Focus::Results => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Escape | AppEvent::Enter if self.focus == Focus::Search => {
                tracing::debug!("focus: Search -> Results");
                self.focus = Focus::Results;
            }

            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Search => Focus::Results,
                    Focus::Results | Focus::Command => Focus::Search,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::SearchFocus => {
                tracing::debug!("focus -> Search");
                self.focus = Focus::Search;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Search => {
                if self.search_bar.handle(&event) {
                    self.query_dirty = true;
                }
            }
            Focus::Results => self.grid.handle(&event, self.search.results().len()),
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(config: Config, theme: Theme) -> Self {
        App { state: AppState::new(config, theme) }
    }

    /// Start the search session, set up the terminal, run the event loop,
    /// and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        let _guard = runtime.enter();

        let client = OlsClient::new(&self.state.config.search)?;
        let session = SearchSession::spawn(Arc::new(client), self.state.config.search.debounce());
        let mut updates = session.subscribe();

        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, &session, &mut updates);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        session: &SearchSession,
        updates: &mut watch::Receiver<SearchState>,
    ) -> anyhow::Result<()> {
        loop {
            if updates.has_changed()? {
                let next = updates.borrow_and_update().clone();
                tracing::debug!(
                    generation = next.generation(),
                    status = ?next.status(),
                    results = next.results().len(),
                    "search state updated"
                );
                self.state.apply_search(next);
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key)
                        if key.kind == crossterm::event::KeyEventKind::Press =>
                    {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }

            if let Some(raw) = self.state.take_query() {
                session.set_query(&raw);
            }
        }
        Ok(())
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 2-line header | 3-line search bar | results | 1-line footer
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Header::new(&state.theme).searching(state.focus == Focus::Search),
        vert[0],
    );
    frame.render_widget(
        SearchBar::new(&state.search_bar, state.focus == Focus::Search, &state.theme),
        vert[1],
    );
    frame.render_widget(
        ResultsPane::new(
            &state.search,
            &state.grid,
            state.focus == Focus::Results,
            state.config.ui.card_columns,
            &state.theme,
        ),
        vert[2],
    );
    frame.render_widget(Footer::new(state.year, &state.theme), vert[3]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    // Position the terminal cursor when the search bar is focused
    if state.focus == Focus::Search {
        let bar = SearchBar::new(&state.search_bar, true, &state.theme);
        let (cx, cy) = bar.cursor_position(vert[1]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use dox_core::OntologyTerm;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::new(Config::defaults(), Theme::load_default())
    }

    fn type_str(s: &mut AppState, text: &str) {
        for c in text.chars() {
            s.handle(AppEvent::Char(c));
        }
    }

    fn searched(query: &str, labels: &[&str]) -> SearchState {
        let mut next = SearchState::default();
        let ticket = next.commit(query).expect("non-blank query");
        let terms = labels.iter().map(|l| OntologyTerm::new(*l, "", "", "")).collect();
        next.complete(&ticket, Ok(terms));
        next
    }

    #[test]
    fn footer_year_is_fixed_at_startup() {
        let s = state();
        assert_eq!(s.year, chrono::Local::now().year());
    }

    #[test]
    fn typing_marks_query_dirty_once() {
        let mut s = state();
        type_str(&mut s, "qg?");
        assert_eq!(s.search_bar.query, "qg?");
        assert!(!s.quit);
        assert!(!s.show_help);
        assert_eq!(s.take_query().as_deref(), Some("qg?"));
        assert_eq!(s.take_query(), None);
    }

    #[test]
    fn cursor_movement_is_not_an_edit() {
        let mut s = state();
        type_str(&mut s, "ab");
        s.take_query();
        s.handle(AppEvent::Nav(Direction::Left));
        assert_eq!(s.take_query(), None);
    }

    #[test]
    fn focus_cycles_between_search_and_results() {
        let mut s = state();
        assert_eq!(s.focus, Focus::Search);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Results);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Search);
        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::Results);
        s.handle(AppEvent::SearchFocus);
        assert_eq!(s.focus, Focus::Search);
    }

    #[test]
    fn help_popup_swallows_keys_until_closed() {
        let mut s = state();
        s.focus = Focus::Results;
        s.handle(AppEvent::Char('?'));
        assert!(s.show_help);
        s.handle(AppEvent::Quit);
        assert!(!s.show_help);
        assert!(!s.quit);
    }

    #[test]
    fn command_bar_round_trip() {
        let mut s = state();
        s.focus = Focus::Results;
        s.handle(AppEvent::Char(':'));
        assert_eq!(s.focus, Focus::Command);
        type_str(&mut s, "nope");
        s.handle(AppEvent::Enter);
        assert_eq!(s.focus, Focus::Command);
        assert_eq!(s.command_bar.error.as_deref(), Some("unknown command: nope"));

        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::Results);

        s.handle(AppEvent::Char(':'));
        type_str(&mut s, "q");
        s.handle(AppEvent::Enter);
        assert!(s.quit);
    }

    #[test]
    fn new_generation_resets_selection() {
        let mut s = state();
        s.apply_search(searched("flu", &["a", "b", "c"]));
        s.focus = Focus::Results;
        s.handle(AppEvent::Last);
        assert_eq!(s.grid.selected, 2);

        // Same generation (e.g. a re-send of the same snapshot) keeps it.
        let same = s.search.clone();
        s.apply_search(same);
        assert_eq!(s.grid.selected, 2);

        let mut next = s.search.clone();
        let ticket = next.commit("cold").expect("non-blank query");
        next.complete(&ticket, Ok(vec![OntologyTerm::new("x", "", "", "")]));
        s.apply_search(next);
        assert_eq!(s.grid.selected, 0);
    }
}
