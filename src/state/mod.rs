// State management module.
// View state for the planets screen and the load-more trigger policy.

pub mod load_more;
pub mod planets;

pub use load_more::{DefaultLoadMoreStrategy, LoadMoreStrategy};
pub use planets::{PlanetsUiState, PlanetsViewModel};
