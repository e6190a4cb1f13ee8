//! End-to-end runs of a controller mounted in a custom parent, mirrored in
//! the terminal.

use std::time::Duration;

use jprogress::controller::CUSTOM_PARENT_CLASS;
use jprogress::dom::{has_class, Document};
use jprogress::progress::{BarStyle, TerminalView, TICKS};
use jprogress::{Options, ProgressController};
use tokio::time::sleep;

mod common;
use common::helpers::*;

#[tokio::test(start_paused = true)]
async fn test_page_load_lifecycle() {
    let document = create_document_with_body(r#"<main id="app"><h1>Loading</h1></main>"#);
    let progress = ProgressController::with_options(
        document,
        Options::new()
            .parent("#app")
            .speed(Duration::from_millis(100))
            .trickle_speed(Duration::from_millis(150)),
    );
    let view = TerminalView::spawn(&progress, BarStyle::hidden());

    let pages = progress
        .track(async {
            sleep(Duration::from_millis(1000)).await;
            vec!["index", "about"]
        })
        .await;
    assert_eq!(pages.len(), 2);
    assert_eq!(progress.status(), None);

    // Still fading out.
    assert!(progress.is_rendered());

    let bar = view.join().await;
    assert_eq!(bar.position(), TICKS);

    progress.idle().await;
    assert!(!progress.is_rendered());
    assert!(!root_is_busy(&progress));
    let document = progress.document();
    let app = document.element_by_id("app");
    assert!(!has_class(&*document, app, CUSTOM_PARENT_CLASS));
    assert_eq!(document.text_content(app.unwrap()), "Loading");
}

#[tokio::test(start_paused = true)]
async fn test_clones_drive_the_same_bar() {
    let progress = create_quiet_controller();
    let worker = progress.clone();

    let handle = tokio::spawn(async move {
        for _ in 0..5 {
            worker.inc(None);
            sleep(Duration::from_millis(10)).await;
        }
    });
    progress.start();
    handle.await.unwrap();

    assert_eq!(count_progress_nodes(&progress), 1);
    let status = progress.status().unwrap();
    assert!(status > 0.08 && status <= 0.5);

    progress.done(false);
    progress.idle().await;
    assert!(!progress.is_rendered());
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_completion() {
    let progress = create_quiet_controller();

    progress.start().done(false);
    progress.idle().await;
    assert!(!progress.is_rendered());

    progress.start();
    assert_status_near(progress.status(), 0.08);
    assert_eq!(count_progress_nodes(&progress), 1);
    assert!(root_is_busy(&progress));
}
