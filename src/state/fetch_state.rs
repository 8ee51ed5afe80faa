/// Lifecycle of a single asynchronous read
///
/// Exactly one value exists per active request lifecycle. It is owned by the
/// component that issued the request and replaced on the next request.
use crate::ClientError;
use std::fmt;

/// Represents the current state of one read request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Request issued, no response applied yet
    Pending,

    /// Response received and normalized
    Ready(T),

    /// Request failed; terminal for this request
    Failed(ClientError),
}

impl<T> FetchState<T> {
    /// Builds a terminal state from a request outcome
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(error) => Self::Failed(error),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true once a response has been applied
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchState<U> {
        match self {
            Self::Pending => FetchState::Pending,
            Self::Ready(value) => FetchState::Ready(f(value)),
            Self::Failed(error) => FetchState::Failed(error),
        }
    }

    /// Short lowercase name of the state, used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T> fmt::Display for FetchState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
