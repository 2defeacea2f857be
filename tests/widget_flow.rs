use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use quickpick::{QuickPickError, Record, SelectConfig, SelectState, DEBOUNCE_QUIET};

fn record(pid: &str, name: &str, datasource: &str) -> Record {
    Record {
        pid: pid.to_string(),
        name: name.to_string(),
        datasource: datasource.to_string(),
    }
}

fn sample_dataset() -> Arc<Vec<Record>> {
    Arc::new(vec![
        record("1", "数据分析报告_000001", "ironbank"),
        record("2", "用户行为统计_000002", "database"),
        record("3", "数据分析报告_000003", "api"),
        record("4", "系统性能监控_000004", "file"),
    ])
}

fn loaded_state(config: SelectConfig) -> SelectState {
    let mut state = SelectState::new(config);
    state.begin_fetch();
    state.apply_fetch(Ok(sample_dataset()));
    state
}

/// Records every listener invocation for later assertions
fn capture_listener(state: &mut SelectState) -> Arc<Mutex<Vec<Option<Record>>>> {
    let seen: Arc<Mutex<Vec<Option<Record>>>> = Arc::new(Mutex::new(Vec::new()));
    let slot = Arc::clone(&seen);
    state.set_listener(Box::new(move |selection| slot.lock().push(selection)));
    seen
}

#[test]
fn rapid_keystrokes_commit_exactly_once() {
    let mut state = loaded_state(SelectConfig::default());
    let t0 = Instant::now();

    state.on_query_change("a", t0);
    state.on_query_change("ab", t0 + Duration::from_millis(100));
    state.on_query_change("abc", t0 + Duration::from_millis(200));

    // Raw text follows immediately; the debounced text does not
    assert_eq!(state.raw_query(), "abc");
    assert_eq!(state.debounced_query(), "");

    // The earlier keystrokes' deadlines were cancelled by the rearm
    assert!(!state.tick(t0 + Duration::from_millis(350)));
    assert!(!state.tick(t0 + Duration::from_millis(450)));
    assert_eq!(state.debounced_query(), "");

    // One quiet period after the last keystroke the single commit lands
    assert!(state.tick(t0 + Duration::from_millis(200) + DEBOUNCE_QUIET));
    assert_eq!(state.debounced_query(), "abc");

    // And nothing further fires
    assert!(!state.tick(t0 + Duration::from_millis(900)));
}

#[test]
fn typing_opens_the_panel() {
    let mut state = loaded_state(SelectConfig::default());
    assert!(!state.is_open());

    state.on_query_change("数", Instant::now());
    assert!(state.is_open());
}

#[test]
fn query_filters_after_the_quiet_period() {
    let mut state = loaded_state(SelectConfig::default());
    let t0 = Instant::now();

    state.on_query_change("分析", t0);
    // Derived view still reflects the empty debounced query
    assert_eq!(state.filtered_len(), 4);

    assert!(state.tick(t0 + DEBOUNCE_QUIET));
    let names: Vec<&str> = state.results().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["数据分析报告_000001", "数据分析报告_000003"]);
}

#[test]
fn selecting_notifies_once_and_echoes_the_name() {
    let mut state = loaded_state(SelectConfig::default());
    let seen = capture_listener(&mut state);
    let t0 = Instant::now();

    state.on_query_change("分析", t0);
    state.tick(t0 + DEBOUNCE_QUIET);

    let picked = state
        .select_at(0, t0 + Duration::from_millis(400))
        .expect("first result");

    assert_eq!(picked, record("1", "数据分析报告_000001", "ironbank"));
    assert_eq!(state.selection(), Some(&picked));
    assert_eq!(state.raw_query(), "数据分析报告_000001");
    assert!(!state.is_open());

    let calls = seen.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].as_ref(), Some(&picked));
}

#[test]
fn clear_resets_query_and_notifies_none() {
    let mut state = loaded_state(SelectConfig::default());
    let seen = capture_listener(&mut state);
    let t0 = Instant::now();

    state.select_at(0, t0).expect("select");
    state.on_clear(t0 + Duration::from_millis(50));

    assert_eq!(state.raw_query(), "");
    assert!(state.selection().is_none());

    let calls = seen.lock();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].is_none());
}

#[test]
fn click_outside_closes_without_touching_state() {
    let mut state = loaded_state(SelectConfig::default());
    let t0 = Instant::now();

    state.on_query_change("分析", t0);
    state.tick(t0 + DEBOUNCE_QUIET);
    state.on_click_outside();

    assert!(!state.is_open());
    assert_eq!(state.raw_query(), "分析");
    assert!(state.selection().is_none());
    // Derived view is untouched as well
    assert_eq!(state.filtered_len(), 2);
}

#[test]
fn focus_refetches_even_when_loaded() {
    let mut state = loaded_state(SelectConfig::default());

    // Refresh-on-focus policy: the dataset is already loaded and the fetch
    // must still be requested
    assert!(state.on_focus());
    assert!(state.is_open());
}

#[test]
fn focus_refetch_can_be_disabled() {
    let config = SelectConfig {
        refresh_on_focus: false,
        ..Default::default()
    };

    let mut empty = SelectState::new(config.clone());
    assert!(empty.on_focus(), "an empty dataset still loads");

    let mut loaded = loaded_state(config);
    assert!(!loaded.on_focus());
}

#[test]
fn racing_fetches_apply_last_writer_wins() {
    let mut state = SelectState::new(SelectConfig::default());

    let first = sample_dataset();
    let second = Arc::new(vec![record("9", "实时数据处理_000009", "cache")]);

    state.begin_fetch();
    state.begin_fetch();
    state.apply_fetch(Ok(first));
    state.apply_fetch(Ok(Arc::clone(&second)));

    assert!(!state.is_loading());
    assert_eq!(state.dataset_len(), 1);
    assert_eq!(state.results()[0].pid, "9");
}

#[test]
fn fetch_failure_keeps_the_stale_dataset() {
    let mut state = loaded_state(SelectConfig::default());

    state.begin_fetch();
    assert!(state.is_loading());

    state.apply_fetch(Err(QuickPickError::Fetch("connection refused".to_string())));

    assert!(!state.is_loading());
    assert_eq!(state.dataset_len(), 4);
}

#[test]
fn fetch_failure_on_empty_dataset_shows_nothing() {
    let mut state = SelectState::new(SelectConfig::default());

    state.begin_fetch();
    state.apply_fetch(Err(QuickPickError::Fetch("boom".to_string())));

    assert!(!state.is_loading());
    assert_eq!(state.filtered_len(), 0);
    assert!(state.results().is_empty());
}

#[test]
fn view_honors_a_custom_cap() {
    let config = SelectConfig {
        result_cap: 2,
        ..Default::default()
    };
    let state = loaded_state(config);

    assert_eq!(state.filtered_len(), 2);
}
