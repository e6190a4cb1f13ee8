//! Example showing a trickling bar mirrored in the terminal

use std::time::Duration;

use color_eyre::Result;
use jprogress::controller::PROGRESS_ID;
use jprogress::dom::Document;
use jprogress::progress::{BarStyle, TerminalView};
use jprogress::{Options, ProgressController, VirtualDocument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let progress = ProgressController::with_options(
        VirtualDocument::new(),
        Options::new().trickle_speed(Duration::from_millis(300)),
    );
    let view = TerminalView::spawn(&progress, BarStyle::default());

    // Pretend to load a page in a few chunks.
    progress.start();
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(700)).await;
        progress.inc(Some(0.1));
        let document = progress.document();
        if let Some(node) = document.element_by_id(PROGRESS_ID) {
            println!("{}", document.outer_html(node));
        }
    }
    progress.done(false);

    view.join().await;
    progress.idle().await;

    let document = progress.document();
    println!("\nFinal document: {}", document.outer_html(document.document_element()));

    Ok(())
}
