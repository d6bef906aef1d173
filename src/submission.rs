//! Submission lifecycle state machine.
//!
//! Drives the rating-selection -> submit -> acknowledge -> reset cycle for
//! one widget mount. All transitions happen synchronously inside discrete
//! calls; the two timed transitions (sink completion and the acknowledgment
//! display delay) are applied by polling [`SubmissionWorkflow::tick`] with
//! the current time, the same way the main loop polls background jobs.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::ACK_DISPLAY_MS;
use crate::sink::{FeedbackPayload, FeedbackSink, PendingSubmission, SinkOutcome};

/// Lifecycle state of one feedback response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// No rating chosen yet. Initial state and the state after a completed
    /// cycle.
    Idle,
    /// A rating is chosen; the rating and free text may still change.
    RatingSelected {
        /// Currently selected rating value.
        rating: u32,
    },
    /// The response is on its way to the sink. The submit control is
    /// disabled and the rating is locked.
    Submitting {
        /// Rating value snapshotted at submit time.
        rating: u32,
    },
    /// The sink accepted the response; the acknowledgment view is showing.
    Submitted,
    /// The sink rejected the response; a retry affordance leads back to
    /// `RatingSelected`.
    Error {
        /// Rating value carried over for retry.
        rating: u32,
        /// Why the sink rejected the response.
        reason: String,
    },
}

impl SubmissionState {
    /// The rating carried by the current state, if any.
    #[must_use]
    pub const fn rating(&self) -> Option<u32> {
        match self {
            Self::RatingSelected { rating }
            | Self::Submitting { rating }
            | Self::Error { rating, .. } => Some(*rating),
            Self::Idle | Self::Submitted => None,
        }
    }
}

/// Notification produced by a [`SubmissionWorkflow::tick`] transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// The sink accepted the response; the acknowledgment view is now up.
    SubmissionAccepted,
    /// The sink rejected the response.
    SubmissionFailed(String),
    /// The acknowledgment delay elapsed and the workflow reset to idle.
    /// The widget should auto-close (uncontrolled modal) and notify the
    /// host.
    CycleCompleted,
}

/// Per-mount submission state machine.
///
/// Created fresh at mount, destroyed at unmount. Dropping the workflow
/// while a submission is in flight cancels the pending handle.
#[derive(Debug)]
pub struct SubmissionWorkflow {
    state: SubmissionState,
    text: String,
    pending: Option<PendingSubmission>,
    reset_at: Option<Instant>,
    ack_display: Duration,
}

impl SubmissionWorkflow {
    /// Creates an idle workflow with the default acknowledgment delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ack_display(Duration::from_millis(ACK_DISPLAY_MS))
    }

    /// Creates an idle workflow with a custom acknowledgment delay.
    #[must_use]
    pub const fn with_ack_display(ack_display: Duration) -> Self {
        Self {
            state: SubmissionState::Idle,
            text: String::new(),
            pending: None,
            reset_at: None,
            ack_display,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Currently selected rating, if any.
    #[must_use]
    pub const fn rating(&self) -> Option<u32> {
        self.state.rating()
    }

    /// Current draft feedback text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a submission is in flight (submit control disabled).
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    /// Whether the rating and free text may currently change.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Idle
                | SubmissionState::RatingSelected { .. }
                | SubmissionState::Error { .. }
        )
    }

    /// Picks or changes the rating.
    ///
    /// Re-enters `RatingSelected` with the new value any number of times.
    /// Rating mutation is forbidden while a submission is in flight or the
    /// acknowledgment view is up; those calls are no-ops.
    pub fn select_rating(&mut self, value: u32) {
        if self.is_editable() {
            self.state = SubmissionState::RatingSelected { rating: value };
        }
    }

    /// Appends a character to the draft text. No-op when not editable.
    pub fn push_char(&mut self, ch: char) {
        if self.is_editable() {
            self.text.push(ch);
        }
    }

    /// Removes the last character of the draft text. No-op when not editable.
    pub fn pop_char(&mut self) {
        if self.is_editable() {
            self.text.pop();
        }
    }

    /// Replaces the draft text. No-op when not editable.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.is_editable() {
            self.text = text.into();
        }
    }

    /// Dismisses an error and returns to `RatingSelected` for retry.
    /// No-op in any other state.
    pub fn retry(&mut self) {
        if let SubmissionState::Error { rating, .. } = self.state {
            self.state = SubmissionState::RatingSelected { rating };
        }
    }

    /// Submits the current rating and draft text to the sink.
    ///
    /// Only reachable from `RatingSelected`; with no rating chosen this is
    /// a silent no-op, not an error. Returns whether a submission started.
    pub fn submit(&mut self, sink: &dyn FeedbackSink, source_id: &str) -> bool {
        let SubmissionState::RatingSelected { rating } = self.state else {
            return false;
        };

        let payload = FeedbackPayload::new(source_id, rating, self.text.clone());
        debug!(source_id, rating, "starting feedback submission");
        self.pending = Some(sink.submit(payload));
        self.state = SubmissionState::Submitting { rating };
        true
    }

    /// Applies any due timed transition.
    ///
    /// Polls the pending submission while `Submitting` and applies the
    /// idle reset (rating and text cleared atomically) once the
    /// acknowledgment delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<WorkflowEvent> {
        match self.state {
            SubmissionState::Submitting { rating } => {
                let outcome = self
                    .pending
                    .as_ref()
                    .and_then(PendingSubmission::try_outcome)?;
                self.pending = None;
                match outcome {
                    SinkOutcome::Accepted => {
                        self.state = SubmissionState::Submitted;
                        self.reset_at = Some(now + self.ack_display);
                        Some(WorkflowEvent::SubmissionAccepted)
                    }
                    SinkOutcome::Rejected(reason) => {
                        debug!(reason, "feedback submission rejected");
                        self.state = SubmissionState::Error {
                            rating,
                            reason: reason.clone(),
                        };
                        Some(WorkflowEvent::SubmissionFailed(reason))
                    }
                }
            }
            SubmissionState::Submitted => {
                let reset_at = self.reset_at?;
                if now < reset_at {
                    return None;
                }
                self.state = SubmissionState::Idle;
                self.text.clear();
                self.reset_at = None;
                Some(WorkflowEvent::CycleCompleted)
            }
            SubmissionState::Idle
            | SubmissionState::RatingSelected { .. }
            | SubmissionState::Error { .. } => None,
        }
    }
}

impl Default for SubmissionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
