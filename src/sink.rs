//! Submission sink boundary.
//!
//! The widget hands a [`FeedbackPayload`] to a [`FeedbackSink`] and polls
//! the returned [`PendingSubmission`] handle for an explicit outcome. The
//! handle carries a cancellation flag that is raised when it is dropped, so
//! tearing a widget down mid-submission releases the transport instead of
//! leaving a dangling timer.
//!
//! [`MockSink`] is the simulated transport: it logs the payload and reports
//! a configured outcome after a fixed delay, running its timer on a worker
//! thread and reporting back over an mpsc channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::constants::MOCK_SINK_DELAY_MS;

/// A feedback response on its way to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackPayload {
    /// Unique submission id.
    pub id: Uuid,
    /// Feedback channel this response belongs to.
    pub source_id: String,
    /// Selected rating value.
    pub rating: u32,
    /// Free-text feedback, possibly empty.
    pub feedback_text: String,
    /// When the user submitted.
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackPayload {
    /// Creates a payload stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(source_id: impl Into<String>, rating: u32, feedback_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id: source_id.into(),
            rating,
            feedback_text: feedback_text.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// Explicit outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// The sink durably recorded the response.
    Accepted,
    /// The sink rejected or failed to record the response.
    Rejected(String),
}

/// Handle to one in-flight submission.
///
/// Poll with [`try_outcome`](Self::try_outcome); dropping the handle raises
/// the cancellation flag shared with the transport.
#[derive(Debug)]
pub struct PendingSubmission {
    rx: Receiver<SinkOutcome>,
    cancelled: Arc<AtomicBool>,
}

/// Resolver half of a pending submission, held by the transport.
#[derive(Debug)]
pub struct SubmissionTicket {
    tx: Sender<SinkOutcome>,
    cancelled: Arc<AtomicBool>,
}

impl SubmissionTicket {
    /// Whether the widget side has been torn down.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Reports the outcome. Silently ignored if the widget side is gone.
    pub fn resolve(self, outcome: SinkOutcome) {
        let _ = self.tx.send(outcome);
    }
}

impl PendingSubmission {
    /// Creates a connected ticket/handle pair for custom transports.
    #[must_use]
    pub fn pair() -> (SubmissionTicket, Self) {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let ticket = SubmissionTicket {
            tx,
            cancelled: Arc::clone(&cancelled),
        };
        (ticket, Self { rx, cancelled })
    }

    /// Polls for the outcome without blocking.
    ///
    /// A transport that went away without resolving counts as a rejection,
    /// never as a silently dropped response.
    #[must_use]
    pub fn try_outcome(&self) -> Option<SinkOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(SinkOutcome::Rejected(
                "submission sink disconnected".to_string(),
            )),
        }
    }

    /// Whether the cancellation flag has been raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// The external system that durably records feedback responses.
pub trait FeedbackSink {
    /// Starts an asynchronous submission and returns its handle.
    fn submit(&self, payload: FeedbackPayload) -> PendingSubmission;
}

/// Simulated transport for demos and tests.
///
/// Logs the payload via `tracing` and reports the configured outcome after
/// a fixed delay. A zero delay resolves synchronously, which keeps tests
/// deterministic.
#[derive(Debug, Clone)]
pub struct MockSink {
    delay: Duration,
    outcome: SinkOutcome,
}

impl MockSink {
    /// Accepting sink with the default simulated delay.
    #[must_use]
    pub fn new() -> Self {
        Self::accepting(Duration::from_millis(MOCK_SINK_DELAY_MS))
    }

    /// Accepting sink with the given delay.
    #[must_use]
    pub const fn accepting(delay: Duration) -> Self {
        Self {
            delay,
            outcome: SinkOutcome::Accepted,
        }
    }

    /// Rejecting sink with the given delay and reason.
    #[must_use]
    pub fn rejecting(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            outcome: SinkOutcome::Rejected(reason.into()),
        }
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackSink for MockSink {
    fn submit(&self, payload: FeedbackPayload) -> PendingSubmission {
        let json = serde_json::to_string(&payload).unwrap_or_default();
        tracing::info!(target: "loopback::sink", payload = %json, "submitting feedback");

        let (ticket, pending) = PendingSubmission::pair();
        let outcome = self.outcome.clone();
        if self.delay.is_zero() {
            ticket.resolve(outcome);
        } else {
            let delay = self.delay;
            thread::spawn(move || {
                thread::sleep(delay);
                if !ticket.is_cancelled() {
                    ticket.resolve(outcome);
                }
            });
        }
        pending
    }
}
