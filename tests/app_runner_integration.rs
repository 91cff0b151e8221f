//! Whole-loop tests: AppRunner on a TestTui with a scripted search backend

use std::{collections::HashMap, sync::Arc, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::prelude::Rect;
use simsearch::{
    core::state::AppState,
    domain::search::{SearchError, SearchResponse, SearchResult, FETCH_FAILURE_MESSAGE},
    infrastructure::{
        config::Config,
        search_client::{ConfigurationError, SearchBackend, SearchFuture},
        tui::{test::TestTui, Event, TuiLike},
    },
    integration::app_runner::AppRunner,
};

#[derive(Default)]
struct ScriptedBackend {
    answers: HashMap<String, Result<SearchResponse, SearchError>>,
}

impl ScriptedBackend {
    fn answer(mut self, query: &str, outcome: Result<SearchResponse, SearchError>) -> Self {
        self.answers.insert(query.to_string(), outcome);
        self
    }
}

impl SearchBackend for ScriptedBackend {
    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
        Box::pin(async move {
            match self.answers.get(query) {
                Some(outcome) => outcome.clone(),
                None => std::future::pending().await,
            }
        })
    }
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn typed(text: &str) -> Vec<Event> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

fn runner_with(
    backend: ScriptedBackend,
    width: u16,
    height: u16,
    events: Vec<Event>,
) -> AppRunner<TestTui> {
    let tui = TestTui::with_events(width, height, events).expect("test tui");
    AppRunner::with_backend(&Config::default(), tui, Arc::new(backend)).expect("runner")
}

async fn run_until(runner: &mut AppRunner<TestTui>, done: impl Fn(&AppState) -> bool) {
    for _ in 0..400 {
        runner.run_once().await.expect("cycle");
        if done(runner.state()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached; state: {:?}", runner.state());
}

#[tokio::test]
async fn test_search_round_trip_renders_results_and_chart() {
    let backend = ScriptedBackend::default().answer(
        "rust",
        Ok(SearchResponse::Results(vec![
            SearchResult::new("Rust is a systems language", 0.8231),
            SearchResult::new("Ownership and borrowing", 0.5),
        ])),
    );
    let mut events = typed("rust");
    events.push(key(KeyCode::Enter));
    let mut runner = runner_with(backend, 120, 30, events);

    run_until(&mut runner, |s| s.search.results.result_count() == 2).await;

    let screen = runner.tui().screen_text();
    assert!(screen.contains("Document 1"));
    assert!(screen.contains("Rust is a systems language"));
    assert!(screen.contains("Similarity: 0.82"));
    assert!(screen.contains("Similarity: 0.50"));
    assert!(screen.contains("Cosine Similarity"));
    assert!(screen.contains("Ready"));
    assert!(screen.contains("2 results"));
    assert!(runner.startup_errors().is_empty());
}

#[tokio::test]
async fn test_failed_search_shows_alert() {
    let backend = ScriptedBackend::default().answer("down", Err(SearchError::Status(502)));
    let mut events = typed("down");
    events.push(key(KeyCode::Enter));
    let mut runner = runner_with(backend, 120, 30, events);

    run_until(&mut runner, |s| s.ui.has_alert()).await;

    assert_eq!(runner.state().ui.alert.as_deref(), Some(FETCH_FAILURE_MESSAGE));
    assert!(runner.tui().screen_text().contains("An error occurred"));

    runner.tui_mut().enqueue_event(key(KeyCode::Enter));
    run_until(&mut runner, |s| !s.ui.has_alert()).await;
    assert!(!runner.state().system.should_quit);
}

#[tokio::test]
async fn test_blank_query_shows_validation_message() {
    let mut events = typed("   ");
    events.push(key(KeyCode::Enter));
    events.push(Event::Render);
    let mut runner = runner_with(ScriptedBackend::default(), 120, 30, events);

    run_until(&mut runner, |s| s.search.validation_message.is_some()).await;
    // The queued Render event redraws the form
    runner.run_once().await.expect("cycle");

    assert!(runner
        .tui()
        .screen_text()
        .contains("Please enter a search query."));
    assert_eq!(runner.state().search.latest_seq, 0);
}

#[tokio::test]
async fn test_invalid_endpoint_disables_submission() {
    let config = Config {
        endpoint: "not a url".to_string(),
        ..Default::default()
    };
    let mut events = typed("rust");
    events.push(key(KeyCode::Enter));
    let tui = TestTui::with_events(120, 30, events).expect("test tui");
    let mut runner = AppRunner::new(&config, tui).expect("runner still starts");

    assert!(matches!(
        runner.startup_errors(),
        [ConfigurationError::InvalidEndpoint { .. }]
    ));

    for _ in 0..6 {
        runner.run_once().await.expect("cycle");
    }

    assert!(!runner.state().search.enabled);
    assert_eq!(runner.state().ui.input.content, "rust");
    assert_eq!(runner.state().search.latest_seq, 0);
    assert!(runner.tui().screen_text().contains("Disabled"));

    // Quitting still works
    runner.tui_mut().enqueue_event(key(KeyCode::Esc));
    assert!(runner.run_once().await.expect("cycle"));
}

#[tokio::test]
async fn test_tiny_terminal_has_no_chart_surface() {
    let mut runner = runner_with(ScriptedBackend::default(), 30, 8, vec![]);

    assert!(matches!(
        runner.startup_errors(),
        [ConfigurationError::ChartSurfaceUnavailable {
            width: 30,
            height: 8,
            ..
        }]
    ));
    runner.run_once().await.expect("cycle");
    assert!(!runner.state().search.enabled);
}

#[tokio::test]
async fn test_resize_event_resizes_terminal() {
    let mut runner = runner_with(ScriptedBackend::default(), 80, 24, vec![Event::Resize(120, 40)]);

    runner.run_once().await.expect("cycle");

    assert_eq!(runner.tui().size().expect("size"), Rect::new(0, 0, 120, 40));
    assert!(runner.tui().draw_count() >= 1);
}

#[tokio::test]
async fn test_paste_is_inserted_on_one_line() {
    let mut runner = runner_with(
        ScriptedBackend::default(),
        120,
        30,
        vec![Event::Paste("deep\nlearning".to_string())],
    );

    runner.run_once().await.expect("cycle");

    assert_eq!(runner.state().ui.input.content, "deep learning");
}

#[tokio::test]
async fn test_prefilled_query_can_be_submitted() {
    let backend = ScriptedBackend::default().answer(
        "vectors",
        Ok(SearchResponse::Error {
            error: "No index loaded".to_string(),
        }),
    );
    let mut runner = runner_with(backend, 120, 30, vec![]);
    runner.prefill_query("vectors");
    runner.run_once().await.expect("cycle");
    assert_eq!(runner.state().ui.input.content, "vectors");

    runner.tui_mut().enqueue_event(key(KeyCode::Enter));
    run_until(&mut runner, |s| !s.is_loading() && s.search.latest_seq == 1).await;

    let screen = runner.tui().screen_text();
    assert!(screen.contains("No index loaded"));
    assert!(screen.contains("No chart yet"));
}

#[tokio::test]
async fn test_run_exits_on_quit_key() {
    let mut runner = runner_with(
        ScriptedBackend::default(),
        120,
        30,
        vec![Event::Init, Event::Tick, key(KeyCode::Esc)],
    );

    tokio::time::timeout(Duration::from_secs(5), runner.run())
        .await
        .expect("loop ends")
        .expect("clean exit");

    assert!(runner.state().system.should_quit);
    assert!(!runner.tui().is_entered());
}
