//! Record fetcher - one page record per subject
//!
//! The fetcher owns a single request lifecycle. Every request is tagged with a
//! generation number; only the resolution carrying the current generation is
//! applied, so a slow response for an earlier subject can never overwrite the
//! state of a later one.

use crate::api::ApiClient;
use crate::model::{PageId, PageView};
use crate::state::FetchState;
use crate::ClientError;
use tokio::sync::mpsc;

/// Outcome of one issued request
struct Resolution {
    generation: u64,
    subject: PageId,
    result: Result<PageView, ClientError>,
}

/// Fetches and normalizes the record currently being viewed
pub struct RecordFetcher {
    client: ApiClient,
    subject: Option<PageId>,
    /// `None` while there is no subject
    state: Option<FetchState<PageView>>,
    generation: u64,
    sender: mpsc::UnboundedSender<Resolution>,
    receiver: mpsc::UnboundedReceiver<Resolution>,
}

impl RecordFetcher {
    /// Creates a fetcher with no subject
    pub fn new(client: ApiClient) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            client,
            subject: None,
            state: None,
            generation: 0,
            sender,
            receiver,
        }
    }

    /// Returns the identifier currently being viewed
    pub fn subject(&self) -> Option<&PageId> {
        self.subject.as_ref()
    }

    /// Returns the state of the current request, or `None` when there is no subject
    pub fn state(&self) -> Option<&FetchState<PageView>> {
        self.state.as_ref()
    }

    /// Returns the record if the current request has completed successfully
    pub fn view(&self) -> Option<&PageView> {
        self.state.as_ref().and_then(FetchState::ready)
    }

    /// Switches to a new subject and issues a request for it
    ///
    /// Empty or absent identifiers clear the subject without issuing a
    /// request. Any earlier request still in flight is superseded.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Returns
    ///
    /// `true` if a request was issued
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id.and_then(PageId::new) {
            Some(id) => {
                self.subject = Some(id);
                self.issue();
                true
            }
            None => {
                self.clear();
                false
            }
        }
    }

    /// Issues a fresh request for the current subject
    ///
    /// # Returns
    ///
    /// `true` if there was a subject to reload
    pub fn reload(&mut self) -> bool {
        if self.subject.is_none() {
            return false;
        }
        self.issue();
        true
    }

    /// Drops the subject; results of requests already in flight are discarded
    pub fn clear(&mut self) {
        self.discard_queued();
        self.generation += 1;
        self.subject = None;
        self.state = None;
    }

    /// Waits until the current request has resolved
    ///
    /// Returns immediately when there is no subject or the state is already
    /// settled. Stale resolutions received while waiting are discarded. If
    /// the backend never answers, this never returns.
    pub async fn settle(&mut self) -> Option<&FetchState<PageView>> {
        while matches!(self.state, Some(FetchState::Pending)) {
            match self.receiver.recv().await {
                Some(resolution) => {
                    self.apply(resolution);
                }
                None => break,
            }
        }
        self.state.as_ref()
    }

    /// Applies every resolution that has already arrived, without waiting
    ///
    /// # Returns
    ///
    /// `true` if the state changed
    pub fn poll_resolutions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(resolution) = self.receiver.try_recv() {
            changed |= self.apply(resolution);
        }
        changed
    }

    fn issue(&mut self) {
        let Some(subject) = self.subject.clone() else {
            return;
        };

        self.discard_queued();
        self.generation += 1;
        let generation = self.generation;
        self.state = Some(FetchState::Pending);

        tracing::debug!(id = %subject, generation, "Fetching page record");

        let client = self.client.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = client.fetch_page(&subject).await;
            // A closed channel means the fetcher was torn down
            let _ = sender.send(Resolution {
                generation,
                subject,
                result,
            });
        });
    }

    /// Drops resolutions that arrived but were never applied; once the
    /// generation moves on they can only be stale
    fn discard_queued(&mut self) {
        let mut discarded = 0usize;
        while self.receiver.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            tracing::trace!(discarded, "Dropped queued page record responses");
        }
    }

    fn apply(&mut self, resolution: Resolution) -> bool {
        if resolution.generation != self.generation {
            tracing::trace!(
                id = %resolution.subject,
                generation = resolution.generation,
                current = self.generation,
                "Discarding stale page record response"
            );
            return false;
        }

        match &resolution.result {
            Ok(view) => {
                for anomaly in &view.anomalies {
                    tracing::warn!(id = %resolution.subject, %anomaly, "Malformed field in page record");
                }
                tracing::debug!(id = %resolution.subject, "Page record ready");
            }
            Err(error) => {
                tracing::error!(id = %resolution.subject, %error, "Failed to fetch page record");
            }
        }

        self.state = Some(FetchState::from_result(resolution.result));
        true
    }
}
