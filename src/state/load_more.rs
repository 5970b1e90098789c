// Load-more trigger policy.
// Decides when the visible window is close enough to the end of the list to fetch the next page.

/// Number of trailing items that trigger a load-more by default.
pub const DEFAULT_BOUNDARY: usize = 5;

pub trait LoadMoreStrategy {
    /// `last_visible` is the index of the last item on screen, `None` if nothing is visible.
    fn should_load_more(&self, last_visible: Option<usize>, total: usize) -> bool;
}

/// Trigger once the last visible item is within `boundary` items of the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultLoadMoreStrategy {
    boundary: usize,
}

impl DefaultLoadMoreStrategy {
    pub fn new(boundary: usize) -> Self {
        Self { boundary }
    }
}

impl Default for DefaultLoadMoreStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY)
    }
}

impl LoadMoreStrategy for DefaultLoadMoreStrategy {
    fn should_load_more(&self, last_visible: Option<usize>, total: usize) -> bool {
        match last_visible {
            Some(index) => index >= total.saturating_sub(self.boundary),
            None => false,
        }
    }
}
