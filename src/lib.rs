//! QuickPick - Searchable dropdown picker over a synthetic record catalog
//!
//! Generates a fixed collection of synthetic records, serves them as JSON
//! from a single HTTP endpoint, fetches them once into the client, and lets
//! the user fuzzy-filter them with debounced input.
//!
//! # Features
//!
//! - **Memoized catalog**: records are synthesized on first access and
//!   served unchanged for the life of the process
//! - **Debounced filtering**: the view follows the query after a 300 ms
//!   quiet period, one pending update at a time
//! - **Bounded view**: case-insensitive substring matching over name and
//!   source tag, hard-capped at 500 rows in dataset order
//! - **Structured highlighting**: matches surface as `{text, is_match}`
//!   segments, styled by the rendering layer
//! - **Two transports**: in-process catalog or the `/api/data` endpoint
//!
//! # Example
//!
//! ```
//! use quickpick::{Catalog, DataProvider, SelectConfig, SelectState};
//! use std::time::{Duration, Instant};
//!
//! fn main() -> quickpick::Result<()> {
//!     let catalog = Catalog::new(1000);
//!
//!     let mut select = SelectState::new(SelectConfig::default());
//!     select.begin_fetch();
//!     select.apply_fetch(catalog.fetch_all());
//!
//!     let now = Instant::now();
//!     select.on_query_change("分析", now);
//!     select.tick(now + Duration::from_millis(300));
//!
//!     for record in select.results().iter().take(5) {
//!         println!("{} [{}]", record.name, record.datasource);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod fetch;
pub mod select;
pub mod server;
pub mod tui;

// Re-export main types
pub use catalog::{Catalog, DataProvider, DataResponse, Record, DEFAULT_RECORD_COUNT};
pub use error::{QuickPickError, Result};
pub use fetch::RemoteCatalog;
pub use select::{
    match_segments, MatchSegment, SelectConfig, SelectState, SelectionListener, DEBOUNCE_QUIET,
    RESULT_CAP,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a count with thousands separators
pub fn format_count(count: usize) -> String {
    let digits: Vec<char> = count.to_string().chars().rev().collect();
    let mut out = String::new();

    for (i, c) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }

    out.chars().rev().collect()
}
