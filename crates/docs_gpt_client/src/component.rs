//! The question component: input text, request state, last answer.
//!
//! The component never performs I/O itself. `submit` hands out a
//! [`Submission`] ticket; whoever runs the request reports back through
//! [`QueryComponent::resolve`]. That keeps every mutation on the caller's
//! event loop while the request is in flight.

use thiserror::Error;

use crate::client::{AnswerBackend, ClientError};
use crate::config::{FailurePolicy, UiSettings};
use crate::messages::AnswerPayload;
use crate::view::{self, View};

/// Whether a request is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
}

/// One dispatched question. The id routes the completion back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("cannot submit an empty question")]
    EmptyQuery,
}

/// Shown instead of the answer after a failure under [`FailurePolicy::ResetToIdle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct QueryComponent {
    settings: UiSettings,
    input: String,
    state: RequestState,
    answer: Option<AnswerPayload>,
    failure: Option<FailureNotice>,
    next_id: u64,
}

impl Default for QueryComponent {
    fn default() -> Self {
        Self::new(UiSettings::default())
    }
}

impl QueryComponent {
    pub fn new(settings: UiSettings) -> Self {
        Self {
            settings,
            input: String::new(),
            state: RequestState::Idle,
            answer: None,
            failure: None,
            next_id: 1,
        }
    }

    /// Store the text verbatim.
    pub fn handle_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// True iff there is something to send. Drives the submit control.
    pub fn can_submit(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn answer(&self) -> Option<&AnswerPayload> {
        self.answer.as_ref()
    }

    pub fn failure(&self) -> Option<&FailureNotice> {
        self.failure.as_ref()
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    /// Enter Pending and take the input text for sending. The input is
    /// empty again as soon as this returns.
    ///
    /// Submitting while another request is pending is allowed; each
    /// completion is applied as it arrives.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if !self.can_submit() {
            return Err(SubmitError::EmptyQuery);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.state = RequestState::Pending;
        self.failure = None;
        let text = std::mem::take(&mut self.input);
        tracing::debug!(submission = id, "question dispatched");
        Ok(Submission { id, text })
    }

    /// Apply the outcome of submission `id`.
    pub fn resolve(&mut self, id: u64, outcome: Result<AnswerPayload, ClientError>) {
        match outcome {
            Ok(payload) => {
                tracing::info!(submission = id, url = %payload.url, "answer received");
                self.state = RequestState::Idle;
                self.failure = None;
                self.answer = Some(payload);
            }
            Err(err) => {
                tracing::error!(submission = id, error = %err, "question request failed");
                if self.settings.failure_policy == FailurePolicy::ResetToIdle {
                    self.state = RequestState::Idle;
                    self.failure = Some(FailureNotice {
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    /// Submit, wait for `backend`, and apply the result in one go.
    /// For hosts without an event loop; typing is blocked meanwhile.
    pub async fn dispatch<B: AnswerBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<u64, SubmitError> {
        let submission = self.submit()?;
        let outcome = backend.predict(submission.text).await;
        self.resolve(submission.id, outcome);
        Ok(submission.id)
    }

    pub fn view(&self) -> View {
        view::render(self)
    }
}
