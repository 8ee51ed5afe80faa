//! Page shell - composes the components of one application view
//!
//! The shell holds the navigation feed, the record fetcher, and the
//! submission form side by side. They share nothing but the API client; the
//! only coupling is the reload epoch published by the submission form.

use crate::api::ApiClient;
use crate::components::{ListFeed, RecordFetcher, SubmissionController};
use tokio::sync::watch;

/// Hosts the three independent request lifecycles of the application
pub struct PageShell {
    client: ApiClient,
    sidebar: ListFeed,
    record: RecordFetcher,
    submission: SubmissionController,
    reloads: watch::Receiver<u64>,
}

impl PageShell {
    /// Mounts every component; the record fetcher starts on `subject` if given
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(client: ApiClient, subject: Option<&str>) -> Self {
        let sidebar = ListFeed::mount(&client);
        let mut record = RecordFetcher::new(client.clone());
        record.select(subject);
        let submission = SubmissionController::new(client.clone());
        let reloads = submission.subscribe_reloads();

        Self {
            client,
            sidebar,
            record,
            submission,
            reloads,
        }
    }

    pub fn sidebar(&self) -> &ListFeed {
        &self.sidebar
    }

    pub fn record(&self) -> &RecordFetcher {
        &self.record
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn submission_mut(&mut self) -> &mut SubmissionController {
        &mut self.submission
    }

    /// Waits for the sidebar and the record to settle, concurrently
    pub async fn settle(&mut self) {
        let (pages, record) = tokio::join!(self.sidebar.settle(), self.record.settle());
        tracing::debug!(
            sidebar = %pages,
            record = record.map_or("no subject", |state| state.label()),
            "Views settled"
        );
    }

    /// Waits for the submission to resolve and applies any resulting reload
    ///
    /// # Returns
    ///
    /// `true` if dependent views were reloaded
    pub async fn settle_submission(&mut self) -> bool {
        self.submission.settle().await;
        self.apply_invalidation()
    }

    /// Reloads every dependent view if a crawl completed since the last check
    ///
    /// The sidebar is remounted and the current record re-requested; nothing
    /// is updated incrementally.
    pub fn apply_invalidation(&mut self) -> bool {
        if !matches!(self.reloads.has_changed(), Ok(true)) {
            return false;
        }
        let epoch = *self.reloads.borrow_and_update();

        tracing::info!(epoch, "Crawl completed; reloading views");
        self.sidebar = ListFeed::mount(&self.client);
        self.record.reload();
        true
    }
}
