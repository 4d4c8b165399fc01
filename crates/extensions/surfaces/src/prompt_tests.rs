use super::*;
use std::sync::Arc;

use glimpse_protocols::DEFAULT_PROMPT;
use glimpse_store::{MemoryStore, StateStore, StoreScope};

fn session_store() -> SessionStore {
    SessionStore::new(Arc::new(MemoryStore::new()))
}

#[tokio::test(start_paused = true)]
async fn test_flushes_latest_edit_after_quiet_period() {
    let session = session_store();
    let editor = PromptEditor::new(session.clone());

    editor.edit("Summarize in one line");
    editor.edit("Summarize in one line:");

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(
        session.prompt_template().await.unwrap(),
        "Summarize in one line:"
    );
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_keystrokes_saves_once() {
    let session = session_store();
    let mut changes = session.store().subscribe();
    let editor = PromptEditor::new(session.clone());

    editor.edit("Condense");
    tokio::time::sleep(Duration::from_millis(200)).await;
    editor.edit("Condense this");
    tokio::time::sleep(Duration::from_millis(200)).await;
    editor.edit("Condense this text:");
    tokio::time::sleep(Duration::from_millis(400)).await;

    // Exactly one synchronized-scope write, carrying the final text.
    let change = changes.recv().await.unwrap();
    assert_eq!(change.scope, StoreScope::Synced);
    assert!(matches!(
        changes.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
    assert_eq!(
        session.prompt_template().await.unwrap(),
        "Condense this text:"
    );
}

#[tokio::test(start_paused = true)]
async fn test_blank_edit_is_never_persisted() {
    let session = session_store();
    let editor = PromptEditor::new(session.clone());

    editor.edit("   ");
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(session.prompt_template().await.unwrap(), DEFAULT_PROMPT);
}

#[tokio::test(start_paused = true)]
async fn test_separate_quiet_periods_save_separately() {
    let session = session_store();
    let mut changes = session.store().subscribe();
    let editor = PromptEditor::new(session.clone());

    editor.edit("First prompt");
    tokio::time::sleep(Duration::from_millis(400)).await;
    editor.edit("Second prompt");
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(changes.recv().await.is_ok());
    assert!(changes.recv().await.is_ok());
    assert_eq!(session.prompt_template().await.unwrap(), "Second prompt");
}

#[tokio::test(start_paused = true)]
async fn test_finish_flushes_pending_edit() {
    let session = session_store();
    let editor = PromptEditor::new(session.clone());

    editor.edit("Pending prompt");
    editor.finish().await;

    assert_eq!(session.prompt_template().await.unwrap(), "Pending prompt");
}
