/// Crawl submission state machine
///
/// `Idle -> Submitting -> {SuccessNotice, ErrorNotice} -> Idle`
use std::fmt;

/// Represents the state of the crawl submission form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing submitted, no notice shown
    #[default]
    Idle,

    /// A crawl request is in flight; input is disabled
    Submitting,

    /// The last submission succeeded
    SuccessNotice(String),

    /// The last submission failed or was rejected locally
    ErrorNotice(String),
}

/// Kind of notice shown under the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl SubmissionState {
    /// Returns true while a request is in flight
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Returns true if a notice is being shown
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SuccessNotice(_) | Self::ErrorNotice(_))
    }

    /// Returns the notice to display, if any
    pub fn notice(&self) -> Option<(NoticeKind, &str)> {
        match self {
            Self::SuccessNotice(message) => Some((NoticeKind::Success, message)),
            Self::ErrorNotice(message) => Some((NoticeKind::Error, message)),
            Self::Idle | Self::Submitting => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::SuccessNotice(_) => "success",
            Self::ErrorNotice(_) => "error",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
