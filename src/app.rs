// App state and main event loop.
// Routes keyboard input to the planets view model and triggers paging as the list scrolls.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;

use crate::repository::PlanetRepository;
use crate::state::{DefaultLoadMoreStrategy, LoadMoreStrategy, PlanetsUiState, PlanetsViewModel};
use crate::ui;

/// Rows moved by Page Up / Page Down.
const PAGE_STEP: usize = 10;

/// Main application state.
pub struct App<R> {
    /// Planets list state and fetches.
    pub planets: PlanetsViewModel<R>,
    /// Cursor and scroll offset of the planets list.
    pub list_state: ListState,
    /// Index of the last list row drawn on screen, updated by the renderer.
    pub last_visible: Option<usize>,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    load_more: DefaultLoadMoreStrategy,
}

impl<R: PlanetRepository + 'static> App<R> {
    pub fn new(planets: PlanetsViewModel<R>, load_more: DefaultLoadMoreStrategy) -> Self {
        Self {
            planets,
            list_state: ListState::default(),
            last_visible: None,
            show_help: false,
            should_quit: false,
            load_more,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            if self.planets.drain() {
                self.sync_selection();
            }
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.check_load_more();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    /// Apply a single key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        if self.planets.selected().is_some() {
            match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                    self.planets.dismiss_selection()
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(PAGE_STEP as isize),
            KeyCode::PageUp => self.move_selection(-(PAGE_STEP as isize)),
            KeyCode::Home | KeyCode::Char('g') => self.select_index(0),
            KeyCode::End | KeyCode::Char('G') => {
                let len = self.planets.state().planets().len();
                self.select_index(len.saturating_sub(1));
            }
            KeyCode::Enter => self.open_selected(),
            _ => {}
        }
    }

    /// Reload from the first page (also the retry action in the error view).
    pub fn refresh(&mut self) {
        self.planets.fetch_first_page();
        self.list_state = ListState::default();
        self.last_visible = None;
    }

    /// Ask for the next page when the visible window nears the end of the list.
    pub fn check_load_more(&mut self) {
        let PlanetsUiState::Success(planets) = self.planets.state() else {
            return;
        };
        if self
            .load_more
            .should_load_more(self.last_visible, planets.len())
        {
            self.planets.load_more();
        }
    }

    /// Keep the cursor on a valid row after the list changes.
    pub fn sync_selection(&mut self) {
        let len = self.planets.state().planets().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.planets.state().planets().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let target = current.saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(target));
    }

    fn select_index(&mut self, index: usize) {
        if !self.planets.state().planets().is_empty() {
            self.list_state.select(Some(index));
        }
    }

    fn open_selected(&mut self) {
        let planet = self
            .list_state
            .selected()
            .and_then(|i| self.planets.state().planets().get(i))
            .cloned();
        if let Some(planet) = planet {
            self.planets.select(planet);
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{PlanetError, Result};
    use crate::model::PlanetPage;
    use crate::model::fixtures::planet;
    use crate::repository::fakes::page;

    /// Serves `pages` planets per page, numbering planets across pages.
    struct PagedRepository {
        per_page: usize,
        pages: usize,
        next_calls: usize,
    }

    impl PagedRepository {
        fn page_at(&self, n: usize) -> PlanetPage {
            let results = (0..self.per_page)
                .map(|i| planet(&format!("Planet {}", n * self.per_page + i)))
                .collect();
            let next = (n + 1 < self.pages).then(|| format!("page{}", n + 1));
            page(
                (self.per_page * self.pages) as u64,
                next.as_deref(),
                results,
            )
        }
    }

    #[async_trait]
    impl PlanetRepository for PagedRepository {
        async fn get_first_page(&mut self) -> Result<PlanetPage> {
            Ok(self.page_at(0))
        }

        async fn get_next_page(&mut self, url: &str) -> Result<PlanetPage> {
            self.next_calls += 1;
            let n = url
                .trim_start_matches("page")
                .parse()
                .map_err(|_| PlanetError::Remote("bad locator".to_string()))?;
            Ok(self.page_at(n))
        }
    }

    async fn app(per_page: usize, pages: usize) -> App<PagedRepository> {
        let mut vm = PlanetsViewModel::new(PagedRepository {
            per_page,
            pages,
            next_calls: 0,
        });
        vm.settle().await;
        let mut app = App::new(vm, DefaultLoadMoreStrategy::default());
        app.sync_selection();
        app
    }

    #[tokio::test]
    async fn test_cursor_starts_at_first_planet() {
        let app = app(10, 1).await;
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_navigation_clamps_to_list() {
        let mut app = app(10, 1).await;

        app.handle_key(KeyCode::Up);
        assert_eq!(app.list_state.selected(), Some(0));

        app.handle_key(KeyCode::PageDown);
        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.list_state.selected(), Some(9));

        app.handle_key(KeyCode::Home);
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_key(KeyCode::End);
        assert_eq!(app.list_state.selected(), Some(9));
    }

    #[tokio::test]
    async fn test_enter_opens_and_esc_closes_details() {
        let mut app = app(10, 1).await;
        app.handle_key(KeyCode::Down);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.planets.selected().map(|p| p.name.as_str()), Some("Planet 1"));

        // Navigation is ignored while details are open
        app.handle_key(KeyCode::Down);
        assert_eq!(app.list_state.selected(), Some(1));

        app.handle_key(KeyCode::Esc);
        assert!(app.planets.selected().is_none());
    }

    #[tokio::test]
    async fn test_scrolling_near_end_loads_more() {
        let mut app = app(10, 2).await;

        app.last_visible = Some(4);
        app.check_load_more();
        assert!(!app.planets.is_loading_more());

        app.last_visible = Some(5);
        app.check_load_more();
        assert!(app.planets.is_loading_more());

        app.planets.settle().await;
        assert_eq!(app.planets.state().planets().len(), 20);
        assert!(app.planets.next_page_url().is_none());

        app.last_visible = Some(19);
        app.check_load_more();
        assert!(!app.planets.is_loading_more());
        assert_eq!(app.planets.repository().lock().await.next_calls, 1);
    }

    #[tokio::test]
    async fn test_refresh_resets_cursor() {
        let mut app = app(10, 1).await;
        app.handle_key(KeyCode::End);

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.planets.state(), &PlanetsUiState::Loading);
        assert!(app.list_state.selected().is_none());

        app.planets.settle().await;
        app.sync_selection();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_keys() {
        let mut app = app(10, 1).await;

        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.list_state.selected(), Some(0));

        app.handle_key(KeyCode::Esc);
        assert!(!app.show_help);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
