//! Client components, each owning one request lifecycle
//!
//! - `ListFeed`: the navigation list, read once per mount
//! - `RecordFetcher`: one full page record, with stale-response suppression
//! - `SubmissionController`: crawl submission form
//! - `PageShell`: hosts the three and applies coarse invalidation
//!
//! Components never share state. Each spawns its request onto the runtime and
//! applies the tagged result when it is polled or settled; results that
//! arrive for a superseded request or a torn-down component are discarded.

mod list_feed;
mod record_fetcher;
mod shell;
mod submission;

pub use list_feed::ListFeed;
pub use record_fetcher::RecordFetcher;
pub use shell::PageShell;
pub use submission::{
    failure_message, success_message, SubmissionController, GENERIC_FAILURE_MESSAGE,
};
