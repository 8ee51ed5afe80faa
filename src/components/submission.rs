//! Submission controller - the crawl request form
//!
//! Accepts a domain or URL, submits a domain-scoped crawl, and reports the
//! outcome as a notice. A successful crawl bumps the reload epoch so that
//! every dependent view is refreshed wholesale.

use crate::api::{ApiClient, CrawlReceipt, CrawlRequest};
use crate::state::SubmissionState;
use crate::url::normalize_crawl_target;
use crate::ClientError;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{oneshot, watch};

/// Notice shown when a failure carries no backend message
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

type CrawlOutcome = Result<CrawlReceipt, ClientError>;

/// Formats the notice shown after a successful crawl
pub fn success_message(page_count: u64) -> String {
    format!(
        "Crawling completed! {} pages processed. You can now view the results.",
        page_count
    )
}

/// Formats the notice shown for a failed submission
///
/// Local validation messages and backend-provided messages are shown as-is;
/// everything else gets [`GENERIC_FAILURE_MESSAGE`].
pub fn failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Validation(message) => message.clone(),
        other => other
            .backend_message()
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string(),
    }
}

/// Drives the crawl submission state machine
pub struct SubmissionController {
    client: ApiClient,
    input: String,
    state: SubmissionState,
    pending: Option<oneshot::Receiver<CrawlOutcome>>,
    reloads: watch::Sender<u64>,
}

impl SubmissionController {
    pub fn new(client: ApiClient) -> Self {
        let (reloads, _) = watch::channel(0);
        Self {
            client,
            input: String::new(),
            state: SubmissionState::Idle,
            pending: None,
            reloads,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Input and submit affordance are disabled while a request is in flight
    pub fn is_input_enabled(&self) -> bool {
        !self.state.is_submitting()
    }

    /// Replaces the input text
    ///
    /// # Returns
    ///
    /// `false` (and leaves the input unchanged) while submitting
    pub fn set_input(&mut self, value: impl Into<String>) -> bool {
        if !self.is_input_enabled() {
            return false;
        }
        self.input = value.into();
        true
    }

    /// Subscribes to the reload epoch, bumped after every successful crawl
    pub fn subscribe_reloads(&self) -> watch::Receiver<u64> {
        self.reloads.subscribe()
    }

    /// Submits the current input
    ///
    /// Clears any previous notice first. Empty input is rejected synchronously
    /// with an error notice and no request. Must be called from within a Tokio
    /// runtime.
    ///
    /// # Returns
    ///
    /// `true` if a crawl request was issued
    pub fn submit(&mut self) -> bool {
        if self.state.is_submitting() {
            tracing::debug!("Crawl submission already in flight; ignoring");
            return false;
        }

        self.state = SubmissionState::Idle;

        let target = match normalize_crawl_target(&self.input) {
            Ok(target) => target,
            Err(error) => {
                tracing::debug!(%error, "Rejected crawl submission");
                self.state = SubmissionState::ErrorNotice(failure_message(&error));
                return false;
            }
        };

        let request = CrawlRequest::domain(target);
        tracing::info!(query = %request.query, "Submitting crawl request");

        let (sender, receiver) = oneshot::channel();
        let client = self.client.clone();
        tokio::spawn(async move {
            // A closed channel means the controller was torn down
            let _ = sender.send(client.submit_crawl(&request).await);
        });

        self.pending = Some(receiver);
        self.state = SubmissionState::Submitting;
        true
    }

    /// Convenience for `set_input` followed by `submit`
    pub fn submit_input(&mut self, value: impl Into<String>) -> bool {
        self.set_input(value) && self.submit()
    }

    /// Waits for the in-flight submission, if any, to resolve
    pub async fn settle(&mut self) -> &SubmissionState {
        if let Some(receiver) = self.pending.as_mut() {
            let outcome = receiver.await.unwrap_or_else(|_| Err(dropped()));
            self.pending = None;
            self.apply(outcome);
        }
        &self.state
    }

    /// Applies the crawl response if it has already arrived, without waiting
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

    /// Dismisses a success or error notice
    pub fn acknowledge(&mut self) {
        if self.state.is_terminal() {
            self.state = SubmissionState::Idle;
        }
    }

    fn apply(&mut self, outcome: CrawlOutcome) {
        match outcome {
            Ok(receipt) => {
                tracing::info!(
                    pages = receipt.page_count,
                    job_id = receipt.job_id.as_deref().unwrap_or("-"),
                    message = receipt.message.as_deref().unwrap_or(""),
                    "Crawl completed"
                );
                self.state = SubmissionState::SuccessNotice(success_message(receipt.page_count));
                self.input.clear();
                self.reloads.send_modify(|epoch| *epoch += 1);
            }
            Err(error) => {
                tracing::warn!(%error, "Crawl submission failed");
                self.state = SubmissionState::ErrorNotice(failure_message(&error));
            }
        }
    }
}

fn dropped() -> ClientError {
    ClientError::Transport("crawl request was dropped".to_string())
}
