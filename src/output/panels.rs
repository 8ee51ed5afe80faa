//! Plain-text panels: navigation list, record status, submission notice

use crate::model::{PageSummary, PageView};
use crate::state::{FetchState, NoticeKind, SubmissionState};

/// Shown while a request is in flight
pub const LOADING_MESSAGE: &str = "Loading...";

/// Shown when the page list is empty
pub const NO_PAGES_MESSAGE: &str = "No pages found";

/// Formats the navigation list
pub fn format_sidebar(state: &FetchState<Vec<PageSummary>>) -> String {
    let mut out = String::from("Recently Crawled Pages\n");

    match state {
        FetchState::Pending => {
            out.push_str(&format!("  {}\n", LOADING_MESSAGE));
        }
        FetchState::Ready(pages) if pages.is_empty() => {
            out.push_str(&format!("  {}\n", NO_PAGES_MESSAGE));
        }
        FetchState::Ready(pages) => {
            for page in pages {
                out.push_str(&format!("  [{}] {}\n", page.id, page.title));
            }
        }
        // The feed never exposes this, but a caller-built state might
        FetchState::Failed(_) => {
            out.push_str(&format!("  {}\n", NO_PAGES_MESSAGE));
        }
    }

    out
}

/// Formats the record area: nothing without a subject, a status line while
/// loading or after a failure, and `render` for a ready view
pub fn format_record_state<F>(state: Option<&FetchState<PageView>>, render: F) -> String
where
    F: FnOnce(&PageView) -> String,
{
    match state {
        None => String::new(),
        Some(FetchState::Pending) => format!("{}\n", LOADING_MESSAGE),
        Some(FetchState::Failed(error)) => format!("{}\n", error),
        Some(FetchState::Ready(view)) => render(view),
    }
}

/// Formats the submission notice, if any
pub fn format_notice(state: &SubmissionState) -> Option<String> {
    if state.is_submitting() {
        return Some("Crawling...".to_string());
    }

    state.notice().map(|(kind, message)| match kind {
        NoticeKind::Success => format!("✓ {}", message),
        NoticeKind::Error => format!("✗ {}", message),
    })
}
