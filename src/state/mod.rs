//! State module for request lifecycles
//!
//! # Components
//!
//! - `FetchState`: lifecycle of one read (pending, ready, failed)
//! - `SubmissionState`: the crawl submission form state machine

mod fetch_state;
mod submission_state;

// Re-export main types
pub use fetch_state::FetchState;
pub use submission_state::{NoticeKind, SubmissionState};
