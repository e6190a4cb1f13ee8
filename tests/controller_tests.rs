//! Tests for the controller module functionality.
//!
//! This file covers the status state machine (`start`, `set`, `inc`, `done`),
//! mounting and removal of the progress element, the animation sequence and
//! the trickle loop.

use std::time::Duration;

use jprogress::controller::{Parent, BUSY_CLASS, CUSTOM_PARENT_CLASS};
use jprogress::dom::{has_class, Document};
use jprogress::utils::to_bar_perc;
use jprogress::{Options, PositionUsing, ProgressController, VirtualDocument};
use tokio::time::sleep;

mod common;
use common::helpers::*;

#[test]
fn test_start_mounts_a_single_node() {
    let progress = create_quiet_controller();

    progress.start();

    assert_status_near(progress.status(), 0.08);
    assert_eq!(count_progress_nodes(&progress), 1);
    assert!(root_is_busy(&progress));
    assert!(progress.is_rendered());
}

#[test]
fn test_start_twice_keeps_one_node() {
    let progress = create_quiet_controller();

    progress.start().start();

    assert_eq!(count_progress_nodes(&progress), 1);
    assert_status_near(progress.status(), 0.08);
}

#[test]
fn test_new_bar_starts_off_screen() {
    let progress = create_quiet_controller();
    progress.start();

    let bar = bar_node(&progress).expect("Bar should be mounted");
    assert_eq!(
        style_of(&progress, bar, "transform").as_deref(),
        Some("translate3d(-100%,0,0)")
    );
    assert_eq!(
        style_of(&progress, bar, "transition").as_deref(),
        Some("all 0 linear")
    );
}

#[test]
fn test_render_without_from_start_uses_current_status() {
    let progress = create_quiet_controller();
    progress.start().set(0.5);
    progress.remove();
    assert!(!progress.is_rendered());

    progress.render(false);

    let bar = bar_node(&progress).expect("Bar should be mounted again");
    assert_eq!(
        style_of(&progress, bar, "transform").as_deref(),
        Some("translate3d(-50%,0,0)")
    );
}

#[test]
fn test_set_clamps_to_minimum_and_completes_at_one() {
    let progress = create_quiet_controller();

    progress.set(0.01);
    assert_status_near(progress.status(), 0.08);

    progress.set(0.5);
    assert_status_near(progress.status(), 0.5);

    progress.set(7.0);
    assert_eq!(progress.status(), None);
}

#[test]
fn test_configured_minimum_applies_to_start() {
    let progress = create_controller_with(Options::new().trickle(false).minimum(0.3));
    progress.start();
    assert_status_near(progress.status(), 0.3);
}

#[test]
fn test_inc_without_run_delegates_to_start() {
    let progress = create_quiet_controller();

    progress.inc(Some(0.5));

    assert_status_near(progress.status(), 0.08);
    assert!(progress.is_rendered());
}

#[test]
fn test_inc_follows_brackets() {
    let progress = create_quiet_controller();
    progress.start();

    let mut statuses = Vec::new();
    for _ in 0..3 {
        progress.inc(None);
        statuses.push(progress.status());
    }

    assert_status_near(statuses[0], 0.18);
    assert_status_near(statuses[1], 0.28);
    assert_status_near(statuses[2], 0.32);
}

#[test]
fn test_inc_is_monotonic_and_never_completes() {
    let progress = create_quiet_controller();
    progress.start();

    let mut previous = progress.status().unwrap();
    for _ in 0..300 {
        progress.inc(None);
        let current = progress.status().expect("inc must not complete the bar");
        assert!(current >= previous, "{current} went below {previous}");
        assert!(current <= 0.994);
        previous = current;
    }
    assert!(previous >= 0.99);

    progress.inc(Some(5.0));
    assert_status_near(progress.status(), 0.994);
}

#[test]
fn test_done_without_run_is_a_no_op() {
    let progress = create_quiet_controller();

    progress.done(false);

    assert_eq!(progress.status(), None);
    assert_eq!(count_progress_nodes(&progress), 0);
    assert!(!root_is_busy(&progress));
    assert_eq!(progress.pending_steps(), 0);
}

#[test]
fn test_remove_is_idempotent() {
    let progress = create_quiet_controller();
    progress.remove();

    progress.start();
    progress.remove();
    progress.remove();

    assert!(!progress.is_rendered());
    assert!(!root_is_busy(&progress));
}

#[test]
fn test_configure_merges_provided_keys() {
    let progress = create_quiet_controller();

    progress
        .configure(Options::new().speed(Duration::from_millis(500)))
        .configure(Options::new().easing("ease-out"));

    let settings = progress.settings();
    assert_eq!(settings.speed, Duration::from_millis(500));
    assert_eq!(settings.easing, "ease-out");
    assert_eq!(settings.minimum, 0.08);
    assert!(!settings.trickle);
}

#[test]
fn test_spinner_visibility() {
    let progress = create_quiet_controller();
    progress.start();
    let node = progress_node(&progress).unwrap();
    assert!(progress
        .document()
        .query_selector(Some(node), SPINNER_SELECTOR)
        .unwrap()
        .is_some());

    let progress = create_controller_with(Options::new().trickle(false).show_spinner(false));
    progress.start();
    let node = progress_node(&progress).unwrap();
    assert!(progress
        .document()
        .query_selector(Some(node), SPINNER_SELECTOR)
        .unwrap()
        .is_none());
    assert!(bar_node(&progress).is_some());
}

#[test]
fn test_custom_parent_selector() {
    let document = create_document_with_body(r#"<main id="app"></main>"#);
    let progress = ProgressController::with_options(
        document,
        Options::new().trickle(false).parent("#app"),
    );

    progress.start();
    let node = progress_node(&progress).unwrap();
    {
        let document = progress.document();
        let app = document.element_by_id("app");
        assert_eq!(document.parent(node), app);
        assert!(has_class(&*document, app, CUSTOM_PARENT_CLASS));
    }

    progress.remove();
    let document = progress.document();
    let app = document.element_by_id("app");
    assert!(!has_class(&*document, app, CUSTOM_PARENT_CLASS));
    assert_eq!(document.element_by_id("Jprogress"), None);
}

#[test]
fn test_custom_parent_element() {
    let document = create_document_with_body(r#"<aside id="side"></aside>"#);
    let side = document.element_by_id("side").unwrap();
    let progress = ProgressController::with_options(
        document,
        Options::new().trickle(false).parent(Parent::Element(side)),
    );

    progress.start();

    let node = progress_node(&progress).unwrap();
    let document = progress.document();
    assert_eq!(document.parent(node), Some(side));
    assert!(has_class(&*document, Some(side), CUSTOM_PARENT_CLASS));
}

#[test]
fn test_unresolved_parent_falls_back_to_body() {
    let progress = create_controller_with(Options::new().trickle(false).parent("#missing"));

    progress.start();

    let node = progress_node(&progress).unwrap();
    let document = progress.document();
    let body = document.body();
    assert_eq!(document.parent(node), Some(body));
    assert!(!has_class(&*document, Some(body), CUSTOM_PARENT_CLASS));
}

#[test]
fn test_existing_element_is_reused() {
    let document = create_document_with_body(r#"<div id="Jprogress"></div>"#);
    let existing = document.element_by_id("Jprogress").unwrap();
    let progress = ProgressController::with_options(document, Options::new().trickle(false));

    progress.start();

    assert_eq!(progress_node(&progress), Some(existing));
    assert_eq!(count_progress_nodes(&progress), 1);
    assert_eq!(bar_node(&progress), None);
}

#[test]
fn test_bad_bar_selector_degrades_silently() {
    let progress = create_controller_with(Options::new().trickle(false).bar_selector("div > p"));

    progress.start().inc(None);

    assert!(progress.is_rendered());
    assert_status_near(progress.status(), 0.18);
}

#[tokio::test(start_paused = true)]
async fn test_step_moves_bar_with_configured_speed_and_easing() {
    let progress = create_controller_with(
        Options::new()
            .trickle(false)
            .speed(Duration::from_millis(350))
            .easing("ease"),
    );

    progress.start();
    progress.idle().await;

    let bar = bar_node(&progress).unwrap();
    assert_eq!(
        style_of(&progress, bar, "transform"),
        Some(format!("translate3d({}%,0,0)", to_bar_perc(0.08)))
    );
    assert_eq!(
        style_of(&progress, bar, "transition").as_deref(),
        Some("all 350ms ease")
    );
    assert_eq!(
        progress.settings().position_using,
        Some(PositionUsing::Translate3d)
    );
}

#[tokio::test(start_paused = true)]
async fn test_margin_positioning_is_probed_once() {
    let document = VirtualDocument::with_style_support(Vec::<String>::new());
    let progress = ProgressController::with_options(document, Options::new().trickle(false));

    progress.start().set(0.5);
    progress.idle().await;

    let bar = bar_node(&progress).unwrap();
    assert_eq!(style_of(&progress, bar, "margin-left").as_deref(), Some("-50%"));
    assert_eq!(progress.settings().position_using, Some(PositionUsing::Margin));
}

#[tokio::test(start_paused = true)]
async fn test_forced_positioning_skips_probe() {
    let progress = create_controller_with(
        Options::new()
            .trickle(false)
            .position_using(PositionUsing::Translate),
    );

    progress.start().set(0.25);
    progress.idle().await;

    let bar = bar_node(&progress).unwrap();
    assert_eq!(
        style_of(&progress, bar, "transform").as_deref(),
        Some("translate(-75%,0)")
    );
}

#[tokio::test(start_paused = true)]
async fn test_forced_done_fades_then_removes() {
    let progress = create_quiet_controller();

    progress.done(true);
    assert_eq!(progress.status(), None);
    assert!(progress.is_rendered());
    let node = progress_node(&progress).unwrap();

    // First step (start) runs 0..200ms, completion step starts at 200ms.
    sleep(Duration::from_millis(300)).await;
    assert_eq!(style_of(&progress, node, "opacity").as_deref(), Some("1"));
    assert_eq!(style_of(&progress, node, "transition").as_deref(), Some("none"));
    let bar = bar_node(&progress).unwrap();
    assert_eq!(
        style_of(&progress, bar, "transform").as_deref(),
        Some("translate3d(0%,0,0)")
    );

    sleep(Duration::from_millis(200)).await;
    assert_eq!(style_of(&progress, node, "opacity").as_deref(), Some("0"));
    assert_eq!(
        style_of(&progress, node, "transition").as_deref(),
        Some("all 200ms linear")
    );
    assert!(progress.is_rendered());

    sleep(Duration::from_millis(200)).await;
    assert!(!progress.is_rendered());
    assert!(!root_is_busy(&progress));
    assert_eq!(progress.pending_steps(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_done_after_progress_clears_busy_state() {
    let progress = create_quiet_controller();
    progress.start().set(0.6);

    progress.done(false);
    assert_eq!(progress.status(), None);

    progress.idle().await;
    assert!(!progress.is_rendered());
    let document = progress.document();
    let root = document.document_element();
    assert!(!has_class(&*document, Some(root), BUSY_CLASS));
}

#[tokio::test(start_paused = true)]
async fn test_trickle_advances_and_stops_after_done() {
    let progress = create_controller_with(Options::new());

    progress.start();
    sleep(Duration::from_millis(250)).await;
    assert_status_near(progress.status(), 0.18);

    sleep(Duration::from_millis(200)).await;
    assert_status_near(progress.status(), 0.28);

    progress.done(false);
    sleep(Duration::from_secs(2)).await;
    assert_eq!(progress.status(), None);
    assert!(!progress.is_rendered());
}

#[tokio::test(start_paused = true)]
async fn test_repeated_start_runs_a_single_trickle_loop() {
    let progress = create_controller_with(Options::new());

    progress.start().start().start();
    sleep(Duration::from_millis(250)).await;

    // Three loops would have moved the bar to 0.32.
    assert_status_near(progress.status(), 0.18);

    progress.done(false);
    sleep(Duration::from_secs(2)).await;

    progress.start();
    sleep(Duration::from_millis(250)).await;
    assert_status_near(progress.status(), 0.18);
}

#[tokio::test(start_paused = true)]
async fn test_subscribe_observes_status() {
    let progress = create_quiet_controller();
    let mut status = progress.subscribe();
    assert_eq!(*status.borrow(), None);

    progress.start();
    assert!(status.has_changed().unwrap());
    assert_status_near(*status.borrow_and_update(), 0.08);

    progress.done(false);
    assert_eq!(*status.borrow_and_update(), None);
}

#[tokio::test(start_paused = true)]
async fn test_track_wraps_a_future() {
    let progress = create_controller_with(Options::new());

    let answer = progress
        .track(async {
            sleep(Duration::from_millis(500)).await;
            42
        })
        .await;

    assert_eq!(answer, 42);
    assert_eq!(progress.status(), None);

    progress.idle().await;
    assert!(!progress.is_rendered());
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("Failed to build runtime")
}

#[test]
fn test_done_completes_on_a_later_runtime() {
    let progress = create_quiet_controller();

    let first = paused_runtime();
    first.block_on(async {
        progress.start();
        progress.idle().await;
    });
    drop(first);

    paused_runtime().block_on(async {
        progress.done(false);
        progress.idle().await;
    });

    assert_eq!(progress.status(), None);
    assert!(!progress.is_rendered());
    assert!(!root_is_busy(&progress));
    assert_eq!(progress.pending_steps(), 0);
}

#[test]
fn test_steps_left_by_a_dropped_runtime_still_run() {
    let progress = create_quiet_controller();

    let first = paused_runtime();
    first.block_on(async {
        progress.start().set(0.5);
        sleep(Duration::from_millis(50)).await;
    });
    drop(first);
    assert_eq!(progress.pending_steps(), 1);

    paused_runtime().block_on(async {
        progress.done(false);
        progress.idle().await;
    });

    assert!(!progress.is_rendered());
    assert!(!root_is_busy(&progress));
}

#[test]
fn test_trickle_resumes_on_a_later_runtime() {
    let progress = create_controller_with(Options::new());

    let first = paused_runtime();
    first.block_on(async {
        progress.start();
        sleep(Duration::from_millis(250)).await;
    });
    drop(first);
    assert_status_near(progress.status(), 0.18);

    paused_runtime().block_on(async {
        progress.start();
        sleep(Duration::from_millis(250)).await;
    });
    assert_status_near(progress.status(), 0.28);
}

#[test]
fn test_child_combinator_parent_falls_back_to_body() {
    let document = create_document_with_body(r#"<main><div id="slot"></div></main>"#);
    let progress = ProgressController::with_options(
        document,
        Options::new().trickle(false).parent("main > div"),
    );

    progress.start();

    let node = progress_node(&progress).unwrap();
    let document = progress.document();
    assert_eq!(document.parent(node), Some(document.body()));
    let slot = document.element_by_id("slot");
    assert!(!has_class(&*document, slot, CUSTOM_PARENT_CLASS));
}
