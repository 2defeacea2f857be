//! Searchable-select presenter
//!
//! The headless core of the widget: debounced query state, the bounded
//! filtered view, and match segmentation. Presentation layers (the TUI in
//! this crate, or any host surface) drive it through events and render from
//! its accessors.

pub mod debounce;
pub mod filter;
pub mod state;

pub use filter::{filter_indices, match_segments, MatchSegment, RESULT_CAP};
pub use state::{SelectConfig, SelectState, SelectionListener, DEBOUNCE_QUIET};
