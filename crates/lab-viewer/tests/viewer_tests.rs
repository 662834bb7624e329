//! Integration tests for `ScenarioViewer` against built-in and sample labs.

use lab_catalog::{ExecutionStatus, LabRegistry, StatusFilter};
use lab_playback::{PlaybackConfig, PlaybackEvent};
use lab_test_utils::{sample_catalog, ScenarioBuilder, CONSOLE};
use lab_viewer::{Clipboard, ClipboardError, ScenarioViewer};
use mockall::mock;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};

mock! {
    TestClipboard {}

    impl Clipboard for TestClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
    }
}

fn sample_viewer() -> ScenarioViewer {
    ScenarioViewer::new(Arc::new(sample_catalog()), PlaybackConfig::default()).unwrap()
}

fn builtin_viewer(lab: &str) -> ScenarioViewer {
    let registry = LabRegistry::builtin().unwrap();
    let catalog = Arc::new(registry.get(lab).unwrap().clone());
    ScenarioViewer::new(catalog, PlaybackConfig::default()).unwrap()
}

#[test]
fn copy_sends_code_buffer_once() {
    let mut viewer = sample_viewer();
    viewer.edit_code("console.log(1)");

    let mut clipboard = MockTestClipboard::new();
    clipboard
        .expect_write_text()
        .withf(|text| text == "console.log(1)")
        .times(1)
        .returning(|_| Ok(()));

    assert!(viewer.copy_code(&clipboard));
}

#[test]
fn copy_failure_never_surfaces() {
    let viewer = sample_viewer();
    let mut clipboard = MockTestClipboard::new();
    clipboard
        .expect_write_text()
        .times(1)
        .returning(|_| Err(ClipboardError::Unavailable));

    assert!(!viewer.copy_code(&clipboard));
    assert!(!viewer.is_running());
    assert_eq!(viewer.output(), "");
}

#[test]
fn payment_search_excludes_fraud_model() {
    let mut viewer = builtin_viewer("ai-ml");
    viewer.set_tab("ModelTesting").unwrap();
    assert!(viewer.filtered().iter().any(|s| s.id.as_str() == "ML-002"));

    viewer.set_search("payment");
    assert!(viewer.filtered().iter().all(|s| s.id.as_str() != "ML-002"));
}

#[test]
fn search_matches_id_case_insensitively() {
    let mut viewer = builtin_viewer("ai-ml");
    viewer.set_tab("ModelTesting").unwrap();
    viewer.set_search("ml-002");
    let ids: Vec<_> = viewer.filtered().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["ML-002"]);
}

#[tokio::test(start_paused = true)]
async fn fail_lines_still_end_in_passed() {
    let mut viewer = builtin_viewer("ai-ml");
    viewer.select("ML-011").unwrap();
    let expected = viewer.selected().expected_output.clone();
    assert!(expected.contains("[FAIL]"));

    viewer.run_to_completion().await.unwrap();

    assert_eq!(viewer.output(), expected);
    assert_eq!(viewer.progress(), 100);
    assert_eq!(viewer.statuses().get("ML-011"), Some(ExecutionStatus::Passed));
}

#[tokio::test(start_paused = true)]
async fn first_line_waits_one_interval() {
    let mut viewer = sample_viewer();
    let start = Instant::now();
    viewer.run().unwrap();

    time::advance(Duration::from_millis(100)).await;
    assert_eq!(viewer.poll_events(), 0);
    assert_eq!(viewer.output(), "");

    viewer.next_event().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(150));
    assert_eq!(viewer.output(), "line1");
}

#[tokio::test(start_paused = true)]
async fn poll_applies_queued_lines_in_order() {
    let mut viewer = sample_viewer();
    viewer.run().unwrap();

    time::sleep(Duration::from_millis(310)).await;
    assert_eq!(viewer.poll_events(), 2);
    assert_eq!(viewer.output(), "line1\nline2");
    assert_eq!(viewer.progress(), 67);
    assert!(viewer.is_running());
}

#[tokio::test(start_paused = true)]
async fn switching_scenario_discards_cancelled_run() {
    let mut viewer = sample_viewer();
    viewer.run().unwrap();
    viewer.next_event().await.unwrap();

    viewer.select("T-003").unwrap();
    time::sleep(Duration::from_secs(2)).await;
    assert_eq!(viewer.poll_events(), 0);
    assert_eq!(viewer.output(), "");
    assert_eq!(viewer.statuses().len(), 0);

    viewer.run_to_completion().await.unwrap();
    assert_eq!(viewer.output(), "[PASS] p95 < 200ms\n[PASS] p99 < 500ms");
    assert!(viewer.statuses().is_passed("T-003"));
    assert!(!viewer.statuses().is_passed("T-001"));
}

#[tokio::test(start_paused = true)]
async fn reselecting_same_scenario_resets() {
    let mut viewer = sample_viewer();
    viewer.edit_code("changed");
    viewer.run().unwrap();
    viewer.next_event().await.unwrap();

    viewer.select("T-001").unwrap();
    assert_eq!(viewer.code(), "await page.goto('/');");
    assert_eq!(viewer.output(), "");
    assert_eq!(viewer.progress(), 0);
    assert!(!viewer.is_running());
}

#[tokio::test(start_paused = true)]
async fn leading_empty_lines_are_kept() {
    let catalog = lab_catalog::Catalog::new(
        "blank",
        "Blank Lab",
        lab_test_utils::tabs(),
        vec![ScenarioBuilder::new("B-1").tab(CONSOLE).output("\n\nend").build()],
    )
    .unwrap();
    let mut viewer = ScenarioViewer::new(Arc::new(catalog), PlaybackConfig::default()).unwrap();

    let mut lines = 0;
    viewer.run().unwrap();
    while let Some(event) = viewer.next_event().await {
        if matches!(event, PlaybackEvent::Line { .. }) {
            lines += 1;
        }
    }

    assert_eq!(lines, 3);
    assert_eq!(viewer.output(), "\n\nend");
}

#[tokio::test(start_paused = true)]
async fn status_filter_tracks_completed_runs() {
    let mut viewer = sample_viewer();
    viewer.set_status_filter(StatusFilter::NotStarted);
    assert_eq!(viewer.filtered().len(), 2);

    viewer.run_to_completion().await.unwrap();
    let ids: Vec<_> = viewer.filtered().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["T-002"]);

    viewer.set_status_filter(StatusFilter::Completed);
    let ids: Vec<_> = viewer.filtered().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["T-001"]);
}

#[tokio::test(start_paused = true)]
async fn dropping_viewer_mid_run_is_clean() {
    let mut viewer = sample_viewer();
    viewer.run().unwrap();
    viewer.next_event().await.unwrap();
    drop(viewer);

    time::sleep(Duration::from_secs(1)).await;
}
