//! Submission state for create, reply and like actions
//!
//! `Idle -> Submitting -> Idle`. While submitting, the triggering control is
//! disabled and a second submit is refused, since the client itself does no
//! deduplication. A failed action is never retried; the user starts it again.

use crate::api::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// What the caller should do once an action finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Re-fetch the affected list or entity
    Refetch,
    /// Show the error to the user
    Surface(ApiError),
}

impl SubmissionState {
    /// Whether the submit control must be disabled
    pub fn is_disabled(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Enter `Submitting`. Fails if an action is already pending.
    pub fn begin(&mut self) -> ApiResult<()> {
        if self.is_disabled() {
            return Err(ApiError::validation("A submission is already in progress"));
        }
        *self = SubmissionState::Submitting;
        Ok(())
    }

    /// Return to `Idle` and decide the follow-up for `result`.
    pub fn complete<T>(&mut self, result: &ApiResult<T>) -> Completion {
        *self = SubmissionState::Idle;
        match result {
            Ok(_) => Completion::Refetch,
            Err(err) => Completion::Surface(err.clone()),
        }
    }
}
