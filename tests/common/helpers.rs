use jprogress::controller::{BUSY_CLASS, PROGRESS_ID};
use jprogress::dom::{has_class, Document};
use jprogress::{NodeId, Options, ProgressController, VirtualDocument};
use tracing_subscriber::EnvFilter;

// Common test constants
pub const BAR_SELECTOR: &str = r#"[role="bar"]"#;
pub const SPINNER_SELECTOR: &str = r#"[role="spinner"]"#;

/// Routes tracing output through the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// === Controller Creation Helpers ===

/// Creates a controller over an empty document with trickling disabled
pub fn create_quiet_controller() -> ProgressController {
    create_controller_with(Options::new().trickle(false))
}

/// Creates a controller over an empty document with custom options
pub fn create_controller_with(options: Options) -> ProgressController {
    init_tracing();
    ProgressController::with_options(VirtualDocument::new(), options)
}

/// Creates a document whose body contains `html`
pub fn create_document_with_body(html: &str) -> VirtualDocument {
    let mut document = VirtualDocument::new();
    let body = document.body();
    document
        .set_inner_html(body, html)
        .expect("Failed to populate test document");
    document
}

// === Document Inspection Helpers ===

/// Returns the mounted progress element, if any
pub fn progress_node(progress: &ProgressController) -> Option<NodeId> {
    progress.document().element_by_id(PROGRESS_ID)
}

/// Returns the bar element inside the mounted progress element
pub fn bar_node(progress: &ProgressController) -> Option<NodeId> {
    let node = progress_node(progress)?;
    progress
        .document()
        .query_selector(Some(node), BAR_SELECTOR)
        .expect("Bar selector should parse")
}

/// Counts the elements carrying the progress id
pub fn count_progress_nodes(progress: &ProgressController) -> usize {
    progress
        .document()
        .query_selector_all(None, &format!("#{PROGRESS_ID}"))
        .expect("Id selector should parse")
        .len()
}

/// Reads an inline style of `node`
pub fn style_of(progress: &ProgressController, node: NodeId, property: &str) -> Option<String> {
    progress.document().style(node, property)
}

/// Whether the document root carries the busy class
pub fn root_is_busy(progress: &ProgressController) -> bool {
    let document = progress.document();
    has_class(&*document, Some(document.document_element()), BUSY_CLASS)
}

/// Asserts that two statuses are equal within floating point noise
pub fn assert_status_near(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("Status should be a number");
    assert!(
        (actual - expected).abs() < 1e-9,
        "status {actual} should be {expected}"
    );
}
