//! Output module for presenting normalized records
//!
//! This module handles:
//! - Rendering page records as markdown (to stdout or a file)
//! - Rendering the navigation list and submission notices as plain text
//!
//! Every function here is a pure render over the view model; none of them
//! fetch or mutate anything.

mod markdown;
mod panels;

pub use markdown::{export_page_markdown, format_link, format_page_markdown};
pub use panels::{
    format_notice, format_record_state, format_sidebar, LOADING_MESSAGE, NO_PAGES_MESSAGE,
};
