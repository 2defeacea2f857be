//! Headless picker state machine
//!
//! Owns the transient widget state (raw query, debounced query, selection,
//! dataset, loading and open flags) and derives the bounded filtered view.
//! All transitions are driven by discrete events plus a `tick` from the host
//! event loop; the presenter itself never spawns work, it only tells the
//! host when a fetch should start.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::catalog::Record;
use crate::error::Result;
use crate::select::debounce::Debouncer;
use crate::select::filter::{filter_indices, RESULT_CAP};

/// Quiet period between the last keystroke and the filtered view updating
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(300);

/// Host-facing selection callback, invoked exactly once per select or clear
pub type SelectionListener = Box<dyn FnMut(Option<Record>) + Send>;

/// Widget configuration
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Text shown in the empty query field
    pub placeholder: String,
    /// Re-fetch the dataset on every focus, replacing it even when already
    /// loaded. Off: focus only loads an empty dataset.
    pub refresh_on_focus: bool,
    /// Quiet period for the query debounce
    pub debounce: Duration,
    /// Hard truncation of the derived view
    pub result_cap: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            placeholder: "请选择...".to_string(),
            refresh_on_focus: true,
            debounce: DEBOUNCE_QUIET,
            result_cap: RESULT_CAP,
        }
    }
}

pub struct SelectState {
    config: SelectConfig,
    raw_query: String,
    debounced_query: String,
    selection: Option<Record>,
    dataset: Arc<Vec<Record>>,
    filtered: Vec<usize>,
    is_loading: bool,
    is_open: bool,
    debounce: Debouncer,
    listener: Option<SelectionListener>,
}

impl SelectState {
    pub fn new(config: SelectConfig) -> Self {
        let debounce = Debouncer::new(config.debounce);
        Self {
            config,
            raw_query: String::new(),
            debounced_query: String::new(),
            selection: None,
            dataset: Arc::new(Vec::new()),
            filtered: Vec::new(),
            is_loading: false,
            is_open: false,
            debounce,
            listener: None,
        }
    }

    /// Register the host callback notified on every select and clear
    pub fn set_listener(&mut self, listener: SelectionListener) {
        self.listener = Some(listener);
    }

    // --- Accessors ---

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    pub fn selection(&self) -> Option<&Record> {
        self.selection.as_ref()
    }

    pub fn dataset_len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Indices into the dataset forming the derived view
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Record at a position of the derived view
    pub fn result_at(&self, view_idx: usize) -> Option<&Record> {
        self.filtered
            .get(view_idx)
            .and_then(|&idx| self.dataset.get(idx))
    }

    /// The derived view in order, for hosts that want the records directly
    pub fn results(&self) -> Vec<&Record> {
        self.filtered
            .iter()
            .filter_map(|&idx| self.dataset.get(idx))
            .collect()
    }

    // --- Events ---

    /// Keystroke: raw query updates immediately, the panel opens, and the
    /// debounced query is rescheduled
    pub fn on_query_change(&mut self, text: &str, now: Instant) {
        self.set_raw(text, now);
        self.is_open = true;
    }

    /// Focus entered the query field. Returns whether the host must start a
    /// dataset fetch: always under the refresh-on-focus policy, otherwise
    /// only while nothing is loaded.
    pub fn on_focus(&mut self) -> bool {
        self.is_open = true;
        self.config.refresh_on_focus || self.dataset.is_empty()
    }

    /// User picked a record: store it, echo its name into the query field,
    /// close the panel, notify the listener
    pub fn on_select(&mut self, record: Record, now: Instant) {
        let name = record.name.clone();
        self.set_raw(&name, now);
        self.selection = Some(record.clone());
        self.is_open = false;
        self.notify(Some(record));
    }

    /// Select by position in the derived view; no-op past the end
    pub fn select_at(&mut self, view_idx: usize, now: Instant) -> Option<Record> {
        let record = self.result_at(view_idx)?.clone();
        self.on_select(record.clone(), now);
        Some(record)
    }

    /// Clear action: drop the selection, empty the query, notify the
    /// listener with none. The host returns focus to the query field
    /// afterwards, which re-opens the panel through `on_focus`.
    pub fn on_clear(&mut self, now: Instant) {
        self.selection = None;
        self.set_raw("", now);
        self.notify(None);
    }

    /// Click landed outside the widget: close the panel, leave query and
    /// selection untouched
    pub fn on_click_outside(&mut self) {
        self.is_open = false;
    }

    /// Advance the debounce clock. Returns true when the debounced query
    /// committed and the derived view was recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(value) = self.debounce.poll(now) {
            if value != self.debounced_query {
                self.debounced_query = value;
                self.refilter();
                return true;
            }
        }
        false
    }

    // --- Fetch lifecycle ---

    /// Host is starting a dataset fetch
    pub fn begin_fetch(&mut self) {
        self.is_loading = true;
    }

    /// A fetch completed. Successful payloads replace the dataset
    /// last-writer-wins; fetches racing each other carry value-identical
    /// payloads, so no sequencing is attempted. Failure keeps the current
    /// dataset and only clears the loading flag.
    pub fn apply_fetch(&mut self, result: Result<Arc<Vec<Record>>>) {
        self.is_loading = false;
        match result {
            Ok(records) => {
                self.dataset = records;
                self.refilter();
            }
            Err(e) => {
                warn!(error = %e, "dataset fetch failed");
            }
        }
    }

    // --- Internals ---

    fn set_raw(&mut self, text: &str, now: Instant) {
        self.raw_query = text.to_string();
        self.debounce.submit(text.to_string(), now);
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.dataset, &self.debounced_query, self.config.result_cap);
    }

    fn notify(&mut self, selection: Option<Record>) {
        if let Some(listener) = self.listener.as_mut() {
            listener(selection);
        }
    }
}
