use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use glimpse_protocols::error::{SummarizeError, SurfaceError};
use glimpse_protocols::session::SUMMARY_IN_PROGRESS;
use glimpse_protocols::SessionPhase;
use glimpse_store::{MemoryStore, SessionStore};

use crate::selection::{TabId, WindowId};

/// Summarizer resolving immediately with a fixed outcome.
struct FixedSummarizer {
    outcome: Result<String, SummarizeError>,
    calls: AtomicUsize,
}

impl FixedSummarizer {
    fn ok(summary: &str) -> Self {
        Self {
            outcome: Ok(summary.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn err(kind: SummarizeError) -> Self {
        Self {
            outcome: Err(kind),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn try_summarize(&self, _text: &str) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Summarizer that parks each call behind its own gate, so tests control
/// resolution order.
struct GatedSummarizer {
    gates: Mutex<Vec<Arc<Semaphore>>>,
    dispatched: AtomicUsize,
}

impl GatedSummarizer {
    fn with_gates(count: usize) -> (Self, Vec<Arc<Semaphore>>) {
        let gates: Vec<_> = (0..count).map(|_| Arc::new(Semaphore::new(0))).collect();
        (
            Self {
                gates: Mutex::new(gates.clone()),
                dispatched: AtomicUsize::new(0),
            },
            gates,
        )
    }
}

#[async_trait]
impl Summarizer for GatedSummarizer {
    async fn try_summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let index = self.dispatched.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap()[index].clone();
        let _permit = gate.acquire().await.expect("gate closed");
        Ok(format!("summary of {text}"))
    }
}

/// Panel host that always opens.
struct OpenPanels;

#[async_trait]
impl PanelHost for OpenPanels {
    async fn open(&self, _target: PanelTarget) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Panel host that always refuses, like a restricted document context.
struct RestrictedPanels;

#[async_trait]
impl PanelHost for RestrictedPanels {
    async fn open(&self, target: PanelTarget) -> Result<(), SurfaceError> {
        Err(SurfaceError::PanelUnavailable {
            target: target.to_string(),
        })
    }
}

fn relay_with(
    summarizer: Arc<dyn Summarizer>,
    panels: Arc<dyn PanelHost>,
) -> (Arc<Relay>, SessionStore) {
    let session = SessionStore::new(Arc::new(MemoryStore::new()));
    let relay = Arc::new(Relay::new(session.clone(), summarizer, panels));
    (relay, session)
}

fn tab_event(text: &str) -> SelectionEvent {
    SelectionEvent::new(text).with_tab(TabId(1))
}

/// Wait until the session satisfies `pred`, driven by change notifications.
async fn wait_for_session<F>(session: &SessionStore, mut rx: tokio::sync::broadcast::Receiver<glimpse_store::StoreChange>, pred: F) -> SessionState
where
    F: Fn(&SessionState) -> bool,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        loop {
            let state = session.session().await.unwrap();
            if pred(&state) {
                return state;
            }
            rx.recv().await.expect("store change channel closed");
        }
    })
    .await
    .expect("session never reached the expected state")
}

#[tokio::test]
async fn test_no_display_target_aborts_without_ui_action() {
    let (relay, session) = relay_with(
        Arc::new(FixedSummarizer::ok("unused")),
        Arc::new(OpenPanels),
    );

    let result = relay
        .handle_selection(SelectionEvent::new("some text").with_tab(TabId::NONE))
        .await;

    assert!(matches!(result, Err(RelayError::NoDisplayTarget)));
    assert!(session.session().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_window_target_used_when_tab_unusable() {
    let (relay, _session) = relay_with(
        Arc::new(FixedSummarizer::ok("summary")),
        Arc::new(OpenPanels),
    );

    let route = relay
        .handle_selection(
            SelectionEvent::new("selected text")
                .with_tab(TabId::NONE)
                .with_window(WindowId(7)),
        )
        .await
        .unwrap();

    assert_eq!(
        route,
        SessionRoute::Panel {
            target: PanelTarget::Window(WindowId(7))
        }
    );
}

#[tokio::test]
async fn test_panel_session_seeds_loading_then_resolves() {
    let (summarizer, gates) = GatedSummarizer::with_gates(1);
    let (relay, session) = relay_with(Arc::new(summarizer), Arc::new(OpenPanels));

    let route = relay
        .handle_selection(tab_event("the selected text"))
        .await
        .unwrap();
    assert!(matches!(route, SessionRoute::Panel { .. }));

    // Dispatched but unresolved: loading with the placeholder summary.
    let state = session.session().await.unwrap();
    assert_eq!(state.phase(), SessionPhase::Loading);
    assert_eq!(state.summary_text, SUMMARY_IN_PROGRESS);
    assert_eq!(state.selected_text, "the selected text");

    let rx = session.subscribe();
    gates[0].add_permits(1);

    let state = wait_for_session(&session, rx, |s| !s.is_loading).await;
    assert_eq!(
        state.phase(),
        SessionPhase::Ready("summary of the selected text")
    );
    assert_eq!(state.selected_text, "the selected text");
}

#[tokio::test]
async fn test_loading_flag_clears_in_one_observable_step() {
    let (summarizer, gates) = GatedSummarizer::with_gates(1);
    let (relay, session) = relay_with(Arc::new(summarizer), Arc::new(OpenPanels));

    relay.handle_selection(tab_event("the selected text")).await.unwrap();

    let mut rx = session.subscribe();
    gates[0].add_permits(1);

    // The resolution write is a single change covering both the summary
    // and the loading flag - no intermediate observable state.
    let change = rx.recv().await.unwrap();
    assert!(change.touches_any(&["summaryText"]));
    assert!(change.touches_any(&["isLoading"]));
}

#[tokio::test]
async fn test_http_failure_lands_in_error_with_placeholder_intact() {
    let (relay, session) = relay_with(
        Arc::new(FixedSummarizer::err(SummarizeError::Api {
            status: 500,
            reason: "Internal Server Error".to_string(),
        })),
        Arc::new(OpenPanels),
    );

    let rx = session.subscribe();
    relay.handle_selection(tab_event("the selected text")).await.unwrap();

    let state = wait_for_session(&session, rx, |s| !s.is_loading).await;
    assert!(state.error.as_deref().unwrap().contains("500"));
    // The summary is still the dispatch-time placeholder.
    assert_eq!(state.summary_text, SUMMARY_IN_PROGRESS);
    assert!(matches!(state.phase(), SessionPhase::Failed(_)));
}

#[tokio::test]
async fn test_panel_open_failure_routes_to_fallback() {
    let summarizer = Arc::new(FixedSummarizer::ok("unused"));
    let (relay, session) = relay_with(summarizer.clone(), Arc::new(RestrictedPanels));

    // A stale panel session from an earlier selection.
    session
        .seed_session(&SessionState::seeded("stale text"))
        .await
        .unwrap();

    let route = relay
        .handle_selection(tab_event("text from a pdf, 100% un-mangled & intact"))
        .await
        .unwrap();

    // Session keys are cleared so passive surfaces never show data that
    // belongs to the fallback session.
    assert!(session.session().await.unwrap().is_empty());

    // No summarization starts on this path; the tab requests its own.
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);

    let SessionRoute::Fallback { location } = route else {
        panic!("expected fallback route");
    };
    let parsed = TabLocation::parse(&location.to_query()).unwrap();
    assert_eq!(parsed.original, "text from a pdf, 100% un-mangled & intact");
    assert!(parsed.outcome.is_none());
}

#[tokio::test]
async fn test_two_rapid_selections_last_resolution_wins() {
    let (summarizer, gates) = GatedSummarizer::with_gates(2);
    let (relay, session) = relay_with(Arc::new(summarizer), Arc::new(OpenPanels));

    relay.handle_selection(tab_event("first")).await.unwrap();
    relay.handle_selection(tab_event("second")).await.unwrap();

    // Resolve in reverse dispatch order: the second request lands first,
    // then the first request lands last and overwrites it.
    let rx = session.subscribe();
    gates[1].add_permits(1);
    wait_for_session(&session, rx, |s| s.summary_text == "summary of second").await;

    let rx = session.subscribe();
    gates[0].add_permits(1);
    let state = wait_for_session(&session, rx, |s| s.summary_text == "summary of first").await;

    // Whichever resolution lands last wins, regardless of dispatch order.
    assert_eq!(state.phase(), SessionPhase::Ready("summary of first"));
}

#[tokio::test]
async fn test_entry_b_replies_without_touching_session() {
    let (relay, session) = relay_with(
        Arc::new(FixedSummarizer::ok("a direct summary")),
        Arc::new(OpenPanels),
    );

    let reply = relay
        .handle_request(SurfaceRequest::get_summary("some fallback tab text"))
        .await;

    assert_eq!(reply, SurfaceReply::result("a direct summary"));
    assert!(session.session().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_entry_b_resolved_failures_ride_the_result_side() {
    // A missing credential is a resolved string under the client contract,
    // not an orchestration error: it must arrive as { result }, never
    // { error }.
    let (relay, _session) = relay_with(
        Arc::new(FixedSummarizer::err(SummarizeError::MissingCredential)),
        Arc::new(OpenPanels),
    );

    let reply = relay
        .handle_request(SurfaceRequest::get_summary("some fallback tab text"))
        .await;

    assert!(!reply.is_error());
    assert_eq!(
        reply.text(),
        "API key not configured. Please set it before requesting a summary."
    );
}
