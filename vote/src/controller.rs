//! # Vote Submission Controller
//!
//! One state machine per dashboard session:
//!
//! ```text
//! Idle --submit--> Submitting --2xx-----> Accepted           (terminal)
//!                             --409-----> RejectedDuplicate  (terminal)
//!                             --failure-> Idle               (manual retry)
//! ```
//!
//! The `Submitting` transition happens under the lock before any I/O, so
//! rapid repeated submits collapse to a single request at the vote sink.
//! `Accepted` and `RejectedDuplicate` both lock voting for good; they differ
//! only in the message shown to the user. A transient failure restores `Idle`
//! before the error is returned, so a manual retry is always possible.
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::{api::ApiClient, auth::Session, error::AppError, tally::Tally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Accepted,
    RejectedDuplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Vote sink confirmed the vote.
    Accepted,
    /// Vote sink reported this identity already voted.
    AlreadyVoted,
    /// A submission is in flight or the session is already locked.
    NotAccepting,
}

struct DashboardState {
    submission: SubmissionState,
    tally: Tally,
}

pub struct Controller {
    api: ApiClient,
    state: Mutex<DashboardState>,
    refresh_now: Notify,
}

impl Controller {
    pub fn new(api: ApiClient) -> Arc<Self> {
        Arc::new(Self {
            api,
            state: Mutex::new(DashboardState {
                submission: SubmissionState::Idle,
                tally: Tally::default(),
            }),
            refresh_now: Notify::new(),
        })
    }

    /// Issues at most one vote for this session.
    ///
    /// The gadget must be known from the last fetched tally. Never retries on
    /// its own; a failed submission only re-enables manual retry.
    pub async fn submit_vote(
        &self,
        gadget_id: &str,
        session: &Session,
    ) -> Result<SubmitOutcome, AppError> {
        {
            let mut state = self.state.lock().unwrap();

            match state.submission {
                SubmissionState::Idle => {}
                _ => return Ok(SubmitOutcome::NotAccepting),
            }

            if !state.tally.contains(gadget_id) {
                return Err(AppError::UnknownGadget(gadget_id.to_string()));
            }

            state.submission = SubmissionState::Submitting;
        }

        match self.api.emit_vote(gadget_id, &session.id_token).await {
            Ok(()) => {
                self.state.lock().unwrap().submission = SubmissionState::Accepted;

                // Show the user their own vote without waiting a full cycle.
                self.refresh_now.notify_one();

                Ok(SubmitOutcome::Accepted)
            }
            Err(AppError::Conflict) => {
                self.state.lock().unwrap().submission = SubmissionState::RejectedDuplicate;

                Ok(SubmitOutcome::AlreadyVoted)
            }
            Err(error) => {
                self.state.lock().unwrap().submission = SubmissionState::Idle;

                Err(error)
            }
        }
    }

    /// Fetches the full tally and replaces the local copy wholesale.
    pub async fn refresh_tally(&self) -> Result<(), AppError> {
        let gadgets = self.api.get_results().await?;

        self.state.lock().unwrap().tally.replace(gadgets);

        Ok(())
    }

    /// Resolves when an out-of-band refresh has been requested.
    pub(crate) async fn refresh_requested(&self) {
        self.refresh_now.notified().await;
    }

    pub fn tally(&self) -> Tally {
        self.state.lock().unwrap().tally.clone()
    }

    pub fn submission(&self) -> SubmissionState {
        self.state.lock().unwrap().submission
    }
}

#[cfg(test)]
mod tests {
    use super::{Controller, SubmissionState};
    use crate::{api::ApiClient, auth::Session, error::AppError};

    fn session() -> Session {
        Session {
            email: "voter@example.com".to_string(),
            id_token: "id-token".to_string(),
            access_token: "access-token".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unknown_gadget_rejected_before_any_call() {
        // Unroutable client: reaching the network would fail loudly.
        let controller = Controller::new(ApiClient::new("http://127.0.0.1:1"));

        let outcome = controller.submit_vote("ghost", &session()).await;

        assert!(matches!(outcome, Err(AppError::UnknownGadget(_))));
        assert_eq!(controller.submission(), SubmissionState::Idle);
    }
}
