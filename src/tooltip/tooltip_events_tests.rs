//! Tests for tooltip/tooltip_events

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use super::*;
use crate::config::{SettingValue, keys};
use crate::overlay::Point;
use crate::test_utils::test_helpers::{FakeHost, marker, text_document};
use crate::tooltip::{HIDE_GRACE_PERIOD, TooltipPhase};

const SHOW_DELAY: Duration = Duration::from_millis(300);

fn host_with_markers(count: usize) -> FakeHost {
    let host = FakeHost::new();
    for i in 0..count {
        host.insert_document(
            &format!("doc{}", i),
            text_document(&format!("Doc {}", i), "<p>text</p>"),
        );
        host.place(&format!("m{}", i), 100.0 + 50.0 * i as f64, 100.0);
    }
    host
}

fn note(i: usize) -> Marker {
    marker(&format!("m{}", i), &format!("doc{}", i))
}

fn shown_title(tooltip: &HoverTooltip<FakeHost>) -> Option<String> {
    tooltip
        .overlay()
        .filter(|o| o.is_visible())
        .and_then(|o| o.content())
        .map(|c| c.title.clone())
}

fn hover(tooltip: &mut HoverTooltip<FakeHost>, i: usize) {
    tooltip.host().set_hovered(&format!("m{}", i), true);
    tooltip.on_hover_start(note(i));
}

fn unhover(tooltip: &mut HoverTooltip<FakeHost>, i: usize) {
    tooltip.host().set_hovered(&format!("m{}", i), false);
    tooltip.on_hover_end(&MarkerId::new(format!("m{}", i)));
}

#[tokio::test(start_paused = true)]
async fn test_hover_start_shows_after_delay() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(1)));

    hover(&mut tooltip, 0);
    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    assert!(tooltip.has_pending_work());

    tokio::time::sleep(SHOW_DELAY - Duration::from_millis(1)).await;
    tooltip.process_pending();
    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);

    tooltip.settle().await;
    assert_eq!(shown_title(&tooltip).as_deref(), Some("Doc 0"));
}

#[tokio::test(start_paused = true)]
async fn test_hover_start_skipped_when_no_longer_hovered() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(1)));

    // Host never reports the marker as hovered
    tooltip.on_hover_start(note(0));
    tooltip.settle().await;

    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    assert_eq!(tooltip.host().enrich_call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_hover_ignored_when_disabled() {
    let host = host_with_markers(1);
    host.set_setting(keys::ENABLED, SettingValue::Bool(false));
    let mut tooltip = HoverTooltip::new(Arc::new(host));

    hover(&mut tooltip, 0);

    assert!(!tooltip.has_pending_work());
    tooltip.settle().await;
    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
}

#[tokio::test(start_paused = true)]
async fn test_zero_show_delay() {
    let host = host_with_markers(1);
    host.set_setting(keys::SHOW_DELAY_MS, SettingValue::Number(0.0));
    let mut tooltip = HoverTooltip::new(Arc::new(host));

    hover(&mut tooltip, 0);
    tooltip.settle().await;

    assert_eq!(shown_title(&tooltip).as_deref(), Some("Doc 0"));
}

#[tokio::test(start_paused = true)]
async fn test_hover_end_cancels_pending_show() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(1)));

    hover(&mut tooltip, 0);
    tokio::time::sleep(Duration::from_millis(100)).await;
    unhover(&mut tooltip, 0);
    tooltip.settle().await;

    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    assert_eq!(tooltip.host().enrich_call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_hover_end_hides_after_grace() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(1)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;

    unhover(&mut tooltip, 0);
    assert_eq!(tooltip.phase(), TooltipPhase::PendingHide);

    tooltip.settle().await;
    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
}

#[tokio::test(start_paused = true)]
async fn test_rehover_within_grace_does_not_flicker() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(2)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;

    unhover(&mut tooltip, 0);
    tokio::time::sleep(HIDE_GRACE_PERIOD / 2).await;
    hover(&mut tooltip, 1);

    // Past the grace period the first tooltip is still up
    tokio::time::sleep(HIDE_GRACE_PERIOD * 2).await;
    tooltip.process_pending();
    assert_eq!(shown_title(&tooltip).as_deref(), Some("Doc 0"));

    tooltip.settle().await;
    assert_eq!(shown_title(&tooltip).as_deref(), Some("Doc 1"));
}

#[tokio::test(start_paused = true)]
async fn test_enter_next_before_leaving_previous() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(2)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;

    hover(&mut tooltip, 1);
    unhover(&mut tooltip, 0);
    tooltip.settle().await;

    assert_eq!(shown_title(&tooltip).as_deref(), Some("Doc 1"));
    assert_eq!(tooltip.current_marker(), Some(&MarkerId::new("m1")));
}

#[tokio::test(start_paused = true)]
async fn test_viewport_change_repositions_hovered_tooltip() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(1)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;

    tooltip.host().place("m0", 400.0, 300.0);

    assert!(tooltip.on_viewport_changed());
    assert_eq!(
        tooltip.overlay().unwrap().position(),
        Some(Point { x: 420.0, y: 320.0 })
    );
}

#[tokio::test(start_paused = true)]
async fn test_viewport_change_ignored_when_not_hovered() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(1)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;

    tooltip.host().set_hovered("m0", false);
    tooltip.host().place("m0", 400.0, 300.0);

    assert!(!tooltip.on_viewport_changed());
    assert_eq!(
        tooltip.overlay().unwrap().position(),
        Some(Point { x: 120.0, y: 120.0 })
    );
}

#[tokio::test(start_paused = true)]
async fn test_viewport_change_when_hidden() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(1)));

    assert!(!tooltip.on_viewport_changed());
}

#[tokio::test(start_paused = true)]
async fn test_marker_refresh_only_moves_for_current_marker() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(2)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;

    tooltip.host().place("m0", 500.0, 500.0);
    assert!(!tooltip.on_marker_refresh(&MarkerId::new("m1")));
    assert_eq!(
        tooltip.overlay().unwrap().position(),
        Some(Point { x: 120.0, y: 120.0 })
    );

    assert!(tooltip.on_marker_refresh(&MarkerId::new("m0")));
    assert_eq!(
        tooltip.overlay().unwrap().position(),
        Some(Point { x: 520.0, y: 520.0 })
    );
}

#[tokio::test(start_paused = true)]
async fn test_teardown_hides_and_cancels_pending_show() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(2)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;
    hover(&mut tooltip, 1);

    tooltip.on_teardown();

    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    assert!(!tooltip.has_pending_work());
    tokio::time::sleep(SHOW_DELAY * 2).await;
    tooltip.process_pending();
    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
}

#[tokio::test(start_paused = true)]
async fn test_hide_cancels_scheduled_show() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(2)));

    hover(&mut tooltip, 1);
    tooltip.hide();
    assert!(!tooltip.has_pending_work());

    tokio::time::sleep(SHOW_DELAY * 2).await;
    tooltip.settle().await;

    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    assert_eq!(tooltip.host().enrich_call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_grace_hide_keeps_pending_show_for_other_marker() {
    let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(2)));
    hover(&mut tooltip, 0);
    tooltip.settle().await;

    hover(&mut tooltip, 1);
    unhover(&mut tooltip, 0);
    tokio::time::sleep(HIDE_GRACE_PERIOD + Duration::from_millis(10)).await;
    tooltip.process_pending();

    // Grace period hid marker 0 but marker 1's show is still scheduled
    assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    assert!(tooltip.has_pending_work());

    tooltip.settle().await;
    assert_eq!(shown_title(&tooltip).as_deref(), Some("Doc 1"));
}

#[derive(Debug, Clone)]
enum HoverOp {
    Start(usize),
    End(usize),
    Wait(u64),
}

fn hover_op() -> impl Strategy<Value = HoverOp> {
    prop_oneof![
        (0usize..3).prop_map(HoverOp::Start),
        (0usize..3).prop_map(HoverOp::End),
        (0u64..500).prop_map(HoverOp::Wait),
    ]
}

fn assert_consistent(tooltip: &HoverTooltip<FakeHost>) -> Result<(), TestCaseError> {
    if tooltip.is_visible() && tooltip.phase() != TooltipPhase::Showing {
        let current = tooltip.current_marker();
        prop_assert!(current.is_some(), "visible tooltip without a marker");
        let index = current.unwrap().0.trim_start_matches('m');
        prop_assert_eq!(shown_title(tooltip), Some(format!("Doc {}", index)));
    }
    if !tooltip.is_visible() {
        prop_assert!(tooltip.overlay().is_none_or(|o| o.content().is_none()));
    }
    Ok(())
}

// For any hover sequence the single overlay only ever shows the content of
// the marker it is attached to, and settles hidden or on the last hovered marker.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_hover_sequences_stay_consistent(ops in prop::collection::vec(hover_op(), 1..25)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        runtime.block_on(async {
            let mut tooltip = HoverTooltip::new(Arc::new(host_with_markers(3)));
            let mut last_started = None;

            for op in &ops {
                match op {
                    HoverOp::Start(i) => {
                        hover(&mut tooltip, *i);
                        last_started = Some(*i);
                    }
                    HoverOp::End(i) => unhover(&mut tooltip, *i),
                    HoverOp::Wait(ms) => tokio::time::sleep(Duration::from_millis(*ms)).await,
                }
                tooltip.process_pending();
                assert_consistent(&tooltip)?;
            }

            tooltip.settle().await;
            assert_consistent(&tooltip)?;
            prop_assert_ne!(tooltip.phase(), TooltipPhase::Showing);
            if tooltip.is_visible() {
                let expected = last_started.map(|i| MarkerId::new(format!("m{}", i)));
                prop_assert_eq!(tooltip.current_marker().cloned(), expected);
            }
            Ok(())
        })?;
    }
}
