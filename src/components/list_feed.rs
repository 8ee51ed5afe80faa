//! List feed - the navigation panel's page list
//!
//! The feed reads the page list once, when mounted. It never blocks the rest
//! of the application: any failure is logged and shown as an empty list.

use crate::api::ApiClient;
use crate::model::PageSummary;
use crate::state::FetchState;
use crate::ClientError;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

type ListOutcome = Result<Vec<PageSummary>, ClientError>;

/// Snapshot of the crawled-page list taken at mount time
pub struct ListFeed {
    state: FetchState<Vec<PageSummary>>,
    pending: Option<oneshot::Receiver<ListOutcome>>,
}

impl ListFeed {
    /// Mounts the feed and issues its single list request
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(client: &ApiClient) -> Self {
        let (sender, receiver) = oneshot::channel();
        let client = client.clone();

        tracing::debug!("Fetching page list");
        tokio::spawn(async move {
            // A closed channel means the feed was unmounted
            let _ = sender.send(client.list_pages().await);
        });

        Self {
            state: FetchState::Pending,
            pending: Some(receiver),
        }
    }

    pub fn state(&self) -> &FetchState<Vec<PageSummary>> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_pending()
    }

    /// Returns the listed pages in backend order; empty until settled
    pub fn pages(&self) -> &[PageSummary] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Waits for the list request to resolve
    ///
    /// Never yields a failed state.
    pub async fn settle(&mut self) -> &FetchState<Vec<PageSummary>> {
        if let Some(receiver) = self.pending.as_mut() {
            let outcome = receiver.await.unwrap_or_else(|_| Err(dropped()));
            self.pending = None;
            self.apply(outcome);
        }
        &self.state
    }

    /// Applies the list response if it has already arrived, without waiting
    ///
    /// # Returns
    ///
    /// `true` if the state changed
    pub fn poll_resolution(&mut self) -> bool {
        let Some(receiver) = self.pending.as_mut() else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(dropped()),
        };

        self.pending = None;
        self.apply(outcome);
        true
    }

    fn apply(&mut self, outcome: ListOutcome) {
        let pages = match outcome {
            Ok(pages) => {
                tracing::debug!(count = pages.len(), "Page list ready");
                pages
            }
            Err(error) => {
                tracing::warn!(%error, "Error fetching pages; showing empty list");
                Vec::new()
            }
        };
        self.state = FetchState::Ready(pages);
    }
}

fn dropped() -> ClientError {
    ClientError::Transport("page list request was dropped".to_string())
}
