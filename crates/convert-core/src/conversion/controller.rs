//! Submission controller driving one conversion attempt at a time.
//!
//! `submit` moves the state to Pending synchronously, then hands the remote
//! call to a spawned task. When the call settles, the task writes exactly one
//! outcome back, unless the view was disposed or a newer submission has
//! started in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::display::DisplayState;
use super::types::{
    ControllerOptions, ConversionRequest, ConversionResponse, SubmissionState,
    UnexpectedStatusPolicy,
};
use crate::api::ConversionApi;
use crate::dispose::DisposalToken;
use crate::error::Result;
use crate::form::FormStore;

/// Handle to a started submission.
#[derive(Debug)]
pub struct SubmissionHandle {
    id: String,
    task: Option<JoinHandle<()>>,
}

impl SubmissionHandle {
    /// Identifier used in logs, e.g. `sub-3`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait until the outcome has been applied (or discarded).
    pub async fn settled(self) {
        if let Some(task) = self.task {
            if let Err(e) = task.await {
                warn!("Submission {} task ended abnormally: {}", self.id, e);
            }
        }
    }
}

/// Owns the submission state and runs conversions against a [`ConversionApi`].
pub struct SubmissionController {
    api: Arc<dyn ConversionApi>,
    state: Arc<watch::Sender<SubmissionState>>,
    /// Id of the most recent submission, bumped under the state lock.
    latest: Arc<AtomicU64>,
    disposal: DisposalToken,
    options: ControllerOptions,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn ConversionApi>) -> Self {
        Self::with_options(api, ControllerOptions::default())
    }

    pub fn with_options(api: Arc<dyn ConversionApi>, options: ControllerOptions) -> Self {
        let (tx, _rx) = watch::channel(SubmissionState::Idle);
        Self {
            api,
            state: Arc::new(tx),
            latest: Arc::new(AtomicU64::new(0)),
            disposal: DisposalToken::new(),
            options,
        }
    }

    /// Current submission state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Current state projected for rendering.
    pub fn display(&self) -> DisplayState {
        DisplayState::from(&*self.state.borrow())
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    /// Snapshot the form and submit it.
    pub fn submit_form(&self, form: &FormStore) -> SubmissionHandle {
        self.submit(form.read())
    }

    /// Start a conversion. Returns immediately; the outcome arrives later.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, request: ConversionRequest) -> SubmissionHandle {
        if self.disposal.is_disposed() {
            let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            warn!("Submission sub-{} ignored: controller disposed", id);
            return SubmissionHandle {
                id: format!("sub-{}", id),
                task: None,
            };
        }

        let rejected = if self.options.validate_required {
            request.validate().err()
        } else {
            None
        };

        let mut id = 0;
        let latest = &self.latest;
        self.state.send_modify(|state| {
            id = latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = match &rejected {
                Some(e) => SubmissionState::Failed {
                    message: e.to_string(),
                },
                None => SubmissionState::Pending { progress: 0.0 },
            };
        });
        let submission_id = format!("sub-{}", id);

        if let Some(e) = rejected {
            info!("Submission {} rejected locally: {}", submission_id, e);
            return SubmissionHandle {
                id: submission_id,
                task: None,
            };
        }

        info!("Submission {} started for {}", submission_id, request.model_id);

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.latest);
        let disposal = self.disposal.clone();
        let policy = self.options.unexpected_status;
        let task_id = submission_id.clone();

        let task = tokio::spawn(async move {
            let outcome = api.convert_engine(&request).await;

            let next = settle(outcome, policy);
            match &next {
                SubmissionState::Success { output } => {
                    info!("Submission {} succeeded: {}", task_id, output)
                }
                SubmissionState::Failed { message } => {
                    warn!("Submission {} failed: {}", task_id, message)
                }
                _ => info!("Submission {} finished without a result", task_id),
            }

            if !apply_if_latest(&state, &latest, &disposal, id, next) {
                debug!(
                    "Submission {} superseded or disposed, dropping result",
                    task_id
                );
            }
        });

        SubmissionHandle {
            id: submission_id,
            task: Some(task),
        }
    }

    /// Close the success banner. No effect in any other state.
    pub fn dismiss(&self) -> bool {
        self.state.send_if_modified(|state| {
            if matches!(state, SubmissionState::Success { .. }) {
                *state = SubmissionState::Idle;
                true
            } else {
                false
            }
        })
    }

    /// Mark the consuming view as gone; pending results will be discarded.
    pub fn dispose(&self) {
        debug!("Submission controller disposed");
        dispose_under_lock(&self.state, &self.disposal);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposal.is_disposed()
    }
}

impl Drop for SubmissionController {
    fn drop(&mut self) {
        dispose_under_lock(&self.state, &self.disposal);
    }
}

/// Flip the token while holding the state lock, so no settlement can be
/// halfway through writing when `dispose` returns.
fn dispose_under_lock(state: &watch::Sender<SubmissionState>, disposal: &DisposalToken) {
    state.send_if_modified(|_| {
        disposal.dispose();
        false
    });
}

/// Write `next` only if the controller is live and `id` is still the most
/// recent submission.
fn apply_if_latest(
    state: &watch::Sender<SubmissionState>,
    latest: &AtomicU64,
    disposal: &DisposalToken,
    id: u64,
    next: SubmissionState,
) -> bool {
    let mut next = Some(next);
    state.send_if_modified(|current| {
        if disposal.is_disposed() || latest.load(Ordering::SeqCst) != id {
            return false;
        }
        if let Some(next) = next.take() {
            *current = next;
        }
        true
    })
}

/// Map the result of a remote call onto the state it leads to.
pub fn settle(
    outcome: Result<ConversionResponse>,
    policy: UnexpectedStatusPolicy,
) -> SubmissionState {
    match outcome {
        Err(e) => SubmissionState::Failed {
            message: e.to_string(),
        },
        Ok(response) if response.is_success() => SubmissionState::Success {
            output: response.output.unwrap_or_default(),
        },
        Ok(response) => match policy {
            UnexpectedStatusPolicy::Ignore => SubmissionState::Idle,
            UnexpectedStatusPolicy::Fail => SubmissionState::Failed {
                message: format!(
                    "conversion finished with unexpected status: {}",
                    response.status
                ),
            },
        },
    }
}
