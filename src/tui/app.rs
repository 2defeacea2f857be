use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use ratatui::prelude::*;

use crate::catalog::{DataProvider, Record};
use crate::error::QuickPickError;
use crate::select::{SelectConfig, SelectState, SelectionListener};
use crate::tui::colors::Theme;
use crate::tui::list::ResultList;
use crate::tui::ui;

/// Messages from background fetch workers
pub enum BgMessage {
    FetchComplete(Arc<Vec<Record>>),
    FetchFailed(String),
}

pub struct App {
    // Widget core
    pub select: SelectState,
    provider: Arc<dyn DataProvider>,

    // Display state
    pub list: ResultList,
    pub theme: Theme,
    pub status_message: String,
    pub cursor_pos: usize,

    // Areas recorded at draw time for mouse hit-testing
    pub input_area: Rect,
    pub panel_area: Rect,
    pub rows_area: Rect,

    // Channel
    bg_tx: Sender<BgMessage>,
    bg_rx: Receiver<BgMessage>,

    // Cleared on teardown so late fetch completions are dropped
    alive: Arc<AtomicBool>,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        config: SelectConfig,
        theme: Theme,
        listener: Option<SelectionListener>,
    ) -> Self {
        let (bg_tx, bg_rx) = unbounded();

        let mut select = SelectState::new(config);
        if let Some(listener) = listener {
            select.set_listener(listener);
        }

        let mut app = Self {
            select,
            provider,
            list: ResultList::default(),
            theme,
            status_message: "Loading...".to_string(),
            cursor_pos: 0,
            input_area: Rect::default(),
            panel_area: Rect::default(),
            rows_area: Rect::default(),
            bg_tx,
            bg_rx,
            alive: Arc::new(AtomicBool::new(true)),
            should_quit: false,
        };

        // Initial load on mount
        app.start_fetch();
        app
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> crate::Result<()>
    where
        QuickPickError: From<B::Error>,
    {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                if self.select.tick(Instant::now()) {
                    self.list.reset(self.select.filtered_len());
                }
                last_tick = Instant::now();
            }

            if self.should_quit {
                // Late completions must not write into torn-down state
                self.alive.store(false, Ordering::Relaxed);
                return Ok(());
            }
        }
    }

    /// Spawn a dataset fetch on a worker thread; completion arrives as a
    /// `BgMessage`. In-flight fetches are never aborted; racing completions
    /// apply last-writer-wins.
    fn start_fetch(&mut self) {
        self.select.begin_fetch();

        let provider = Arc::clone(&self.provider);
        let tx = self.bg_tx.clone();
        let alive = Arc::clone(&self.alive);

        thread::spawn(move || {
            let result = provider.fetch_all();
            if !alive.load(Ordering::Relaxed) {
                return;
            }
            let _ = match result {
                Ok(records) => tx.send(BgMessage::FetchComplete(records)),
                Err(e) => tx.send(BgMessage::FetchFailed(e.to_string())),
            };
        });
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_rx.try_recv() {
            match msg {
                BgMessage::FetchComplete(records) => {
                    let total = records.len();
                    self.select.apply_fetch(Ok(records));
                    self.list.reset(self.select.filtered_len());
                    self.status_message = format!("{} records loaded", total);
                }
                BgMessage::FetchFailed(message) => {
                    self.select
                        .apply_fetch(Err(QuickPickError::Fetch(message.clone())));
                    self.status_message = format!("Fetch failed: {}", message);
                }
            }
        }
    }

    /// Focus entering the query field; re-fetches per the widget policy
    fn focus_input(&mut self) {
        if self.select.on_focus() {
            self.start_fetch();
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_selection();
                return;
            }
            KeyCode::Esc => {
                if self.select.is_open() {
                    self.select.on_click_outside();
                } else if !self.select.raw_query().is_empty() {
                    self.clear_selection();
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        match key.code {
            KeyCode::Enter => {
                if self.select.is_open() {
                    if let Some(i) = self.list.highlighted {
                        self.select_row(i);
                    }
                }
            }

            KeyCode::Down => {
                if self.select.is_open() {
                    self.list.select_next(self.select.filtered_len());
                } else {
                    self.focus_input();
                }
            }
            KeyCode::Up => self.list.select_prev(),
            KeyCode::PageDown => self.list.page_down(self.select.filtered_len()),
            KeyCode::PageUp => self.list.page_up(),

            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut query = self.select.raw_query().to_string();
                query.insert(self.cursor_pos, c);
                let cursor = self.cursor_pos + c.len_utf8();
                self.edit_query(query, cursor);
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    let mut query = self.select.raw_query().to_string();
                    // Find the previous character boundary
                    let prev = query[..self.cursor_pos]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    query.remove(prev);
                    self.edit_query(query, prev);
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.select.raw_query().len() {
                    let mut query = self.select.raw_query().to_string();
                    query.remove(self.cursor_pos);
                    let cursor = self.cursor_pos;
                    self.edit_query(query, cursor);
                }
            }
            KeyCode::Left => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = self.select.raw_query()[..self.cursor_pos]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            KeyCode::Right => {
                let query = self.select.raw_query();
                if self.cursor_pos < query.len() {
                    self.cursor_pos = query[self.cursor_pos..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor_pos + i)
                        .unwrap_or(query.len());
                }
            }
            KeyCode::Home => self.cursor_pos = 0,
            KeyCode::End => self.cursor_pos = self.select.raw_query().len(),

            _ => {}
        }
    }

    // --- Mouse handling ---

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.input_area.contains(position) {
                    self.focus_input();
                } else if self.select.is_open() && self.rows_area.contains(position) {
                    let row = (mouse.row - self.rows_area.y) as usize + self.list.scroll_offset;
                    if row < self.select.filtered_len() {
                        self.select_row(row);
                    }
                } else if self.select.is_open() && !self.panel_area.contains(position) {
                    self.select.on_click_outside();
                }
            }
            MouseEventKind::ScrollDown if self.select.is_open() => {
                self.list.select_next(self.select.filtered_len());
            }
            MouseEventKind::ScrollUp if self.select.is_open() => {
                self.list.select_prev();
            }
            _ => {}
        }
    }

    // --- Actions ---

    fn edit_query(&mut self, query: String, cursor: usize) {
        self.cursor_pos = cursor;
        self.select.on_query_change(&query, Instant::now());
    }

    fn select_row(&mut self, view_idx: usize) {
        if let Some(record) = self.select.select_at(view_idx, Instant::now()) {
            self.cursor_pos = self.select.raw_query().len();
            self.status_message = format!("Selected {} [{}]", record.name, record.datasource);
        }
    }

    /// Clear then return focus to the query field; the focus re-opens the
    /// panel and re-fetches per policy, mirroring the clear-button cascade
    fn clear_selection(&mut self) {
        self.select.on_clear(Instant::now());
        self.cursor_pos = 0;
        self.status_message = "Selection cleared".to_string();
        self.focus_input();
    }
}
