// Planets view state.
// Owns the UI-facing state machine and runs repository fetches as background tasks.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{PlanetError, Result};
use crate::model::{PageOrigin, Planet, PlanetPage};
use crate::repository::PlanetRepository;

const NO_NETWORK_MESSAGE: &str = "No network connection available";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// What the planets screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanetsUiState {
    Loading,
    Success(Vec<Planet>),
    Error(String),
}

impl PlanetsUiState {
    pub fn planets(&self) -> &[Planet] {
        match self {
            PlanetsUiState::Success(planets) => planets.as_slice(),
            PlanetsUiState::Loading | PlanetsUiState::Error(_) => &[],
        }
    }
}

/// Which fetch produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    FirstPage,
    NextPage,
}

/// Completion of a background fetch, applied on the UI thread.
#[derive(Debug)]
pub struct FetchOutcome {
    generation: u64,
    kind: FetchKind,
    result: Result<PlanetPage>,
}

/// Convert a failure into the message shown to the user.
pub fn error_message(error: &PlanetError) -> String {
    match error {
        PlanetError::NoNetwork => NO_NETWORK_MESSAGE.to_string(),
        PlanetError::Remote(message) => message.clone(),
        PlanetError::Io(_) | PlanetError::Json(_) | PlanetError::Other(_) => {
            UNKNOWN_ERROR_MESSAGE.to_string()
        }
    }
}

/// View model for the paginated planets list.
///
/// Fetches run on the tokio runtime and report back through a channel; state only
/// changes when the owner calls [`apply`](Self::apply), [`drain`](Self::drain) or
/// [`settle`](Self::settle). Dropping the view model aborts in-flight fetches.
pub struct PlanetsViewModel<R> {
    repository: Arc<Mutex<R>>,
    state: PlanetsUiState,
    is_loading_more: bool,
    selected: Option<Planet>,
    next_page_url: Option<String>,
    origin: PageOrigin,
    /// Bumped by every first-page fetch; outcomes from older generations are dropped.
    generation: u64,
    outcomes_tx: UnboundedSender<FetchOutcome>,
    outcomes_rx: UnboundedReceiver<FetchOutcome>,
    first_page_task: Option<JoinHandle<()>>,
    next_page_task: Option<JoinHandle<()>>,
}

impl<R: PlanetRepository + 'static> PlanetsViewModel<R> {
    /// Create the view model and start loading the first page.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(repository: R) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let mut view_model = Self {
            repository: Arc::new(Mutex::new(repository)),
            state: PlanetsUiState::Loading,
            is_loading_more: false,
            selected: None,
            next_page_url: None,
            origin: PageOrigin::Remote,
            generation: 0,
            outcomes_tx,
            outcomes_rx,
            first_page_task: None,
            next_page_task: None,
        };
        view_model.fetch_first_page();
        view_model
    }

    pub fn state(&self) -> &PlanetsUiState {
        &self.state
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn selected(&self) -> Option<&Planet> {
        self.selected.as_ref()
    }

    pub fn next_page_url(&self) -> Option<&str> {
        self.next_page_url.as_deref()
    }

    /// Origin of the most recently applied page.
    pub fn origin(&self) -> PageOrigin {
        self.origin
    }

    /// Load (or reload) the first page. Also the retry action of the error view.
    pub fn fetch_first_page(&mut self) {
        self.generation += 1;
        abort(&mut self.first_page_task);
        abort(&mut self.next_page_task);
        self.is_loading_more = false;
        self.state = PlanetsUiState::Loading;

        let repository = Arc::clone(&self.repository);
        self.first_page_task = Some(self.spawn(FetchKind::FirstPage, async move {
            repository.lock().await.get_first_page().await
        }));
    }

    /// Fetch the next page if one exists and none is already loading.
    ///
    /// Returns whether a fetch was started.
    pub fn load_more(&mut self) -> bool {
        if self.is_loading_more {
            return false;
        }
        let Some(url) = self.next_page_url.clone() else {
            return false;
        };

        debug!(url = %url, "loading more planets");
        self.is_loading_more = true;
        let repository = Arc::clone(&self.repository);
        self.next_page_task = Some(self.spawn(FetchKind::NextPage, async move {
            repository.lock().await.get_next_page(&url).await
        }));
        true
    }

    pub fn select(&mut self, planet: Planet) {
        self.selected = Some(planet);
    }

    pub fn dismiss_selection(&mut self) {
        self.selected = None;
    }

    /// Apply every outcome that has already arrived. Returns whether anything changed.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    /// Wait for the next outcome and apply it.
    pub async fn settle(&mut self) -> bool {
        match self.outcomes_rx.recv().await {
            Some(outcome) => self.apply(outcome),
            None => false,
        }
    }

    /// Apply a fetch outcome to the state. Stale outcomes are ignored.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(kind = ?outcome.kind, "dropping stale fetch outcome");
            return false;
        }

        match outcome.kind {
            FetchKind::FirstPage => {
                self.first_page_task = None;
                match outcome.result {
                    Ok(page) => {
                        if page.is_from_cache() {
                            info!(results = page.results.len(), "showing cached planets");
                        }
                        self.next_page_url = page.next;
                        self.origin = page.origin;
                        self.state = PlanetsUiState::Success(page.results);
                    }
                    Err(e) => self.fail(&e),
                }
            }
            FetchKind::NextPage => {
                self.next_page_task = None;
                match outcome.result {
                    Ok(page) => {
                        let mut planets = match std::mem::replace(
                            &mut self.state,
                            PlanetsUiState::Loading,
                        ) {
                            PlanetsUiState::Success(planets) => planets,
                            PlanetsUiState::Loading | PlanetsUiState::Error(_) => Vec::new(),
                        };
                        planets.extend(page.results);
                        self.next_page_url = page.next;
                        self.origin = page.origin;
                        self.state = PlanetsUiState::Success(planets);
                    }
                    // The already loaded list is dropped along with the append
                    Err(e) => self.fail(&e),
                }
                self.is_loading_more = false;
            }
        }
        true
    }

    fn fail(&mut self, error: &PlanetError) {
        warn!(error = %error, "planets fetch failed");
        self.state = PlanetsUiState::Error(error_message(error));
    }

    fn spawn<F>(&self, kind: FetchKind, fetch: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<PlanetPage>> + Send + 'static,
    {
        let generation = self.generation;
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = fetch.await;
            // The receiver lives as long as the view model
            let _ = outcomes.send(FetchOutcome {
                generation,
                kind,
                result,
            });
        })
    }
}

#[cfg(test)]
impl<R> PlanetsViewModel<R> {
    pub fn repository(&self) -> Arc<Mutex<R>> {
        Arc::clone(&self.repository)
    }
}

impl<R> Drop for PlanetsViewModel<R> {
    fn drop(&mut self) {
        abort(&mut self.first_page_task);
        abort(&mut self.next_page_task);
    }
}

fn abort(task: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = task.take() {
        handle.abort();
    }
}
