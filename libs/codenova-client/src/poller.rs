//! Result Poller - Drives a Submitted Task to Its Outcome
//!
//! **Responsibility:**
//! Ask the backend for a task's results right away and then once per
//! interval until a terminal answer arrives.
//!
//! **Rules:**
//! - One poll in flight at a time; the next tick waits for the previous reply
//! - "Not ready" is silent and keeps the loop alive, up to `max_poll_attempts`
//! - Results or any failure settle the task and end the loop
//! - A reply is applied only while its task is still the active one
//! - Re-arming for another task cancels the current loop first

use std::sync::Arc;
use std::time::Duration;

use codenova_common::types::JudgeResult;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::PollOutcome;
use crate::capabilities::Notice;
use crate::error::{PlaygroundError, Result};
use crate::playground::{Inner, Settlement, SubmissionPhase};
use crate::results::ResultsSummary;

/// Running poll loop for one task; cancels it when dropped
pub(crate) struct PollerHandle {
    task_id: String,
    token: CancellationToken,
    _join: JoinHandle<()>,
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Point the poller at `task_id`.
///
/// Same id as the running loop: nothing happens. Different id: the old loop
/// is cancelled and a new one started. `None` or an empty id only cancels.
pub(crate) fn rearm(inner: &Arc<Inner>, task_id: Option<&str>) {
    let mut slot = match inner.poller.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let (Some(current), Some(id)) = (slot.as_ref(), task_id) {
        if current.task_id == id {
            return;
        }
    }

    if let Some(old) = slot.take() {
        debug!(task_id = %old.task_id, "Cancelling poller");
    }

    let Some(id) = task_id.filter(|id| !id.is_empty()) else {
        return;
    };

    let token = CancellationToken::new();
    let join = tokio::spawn(poll_loop(inner.clone(), id.to_string(), token.clone()));
    *slot = Some(PollerHandle {
        task_id: id.to_string(),
        token,
        _join: join,
    });
}

/// Shortest gap between polls; a zero period would panic the interval
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Forget the handle for `task_id` once its loop has finished
fn release(inner: &Inner, task_id: &str) {
    let mut slot = match inner.poller.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if slot.as_ref().is_some_and(|handle| handle.task_id == task_id) {
        slot.take();
    }
}

async fn poll_loop(inner: Arc<Inner>, task_id: String, token: CancellationToken) {
    let max_attempts = inner.config.max_poll_attempts;
    let period = inner.config.poll_interval.max(MIN_POLL_INTERVAL);
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        task_id = %task_id,
        interval_ms = period.as_millis() as u64,
        max_attempts,
        "Polling for results"
    );

    let mut attempts = 0u32;
    let verdict = loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!(task_id = %task_id, attempts, "Poller stopped");
                return;
            }
            _ = ticker.tick() => {}
        }

        attempts += 1;
        let outcome = tokio::select! {
            _ = token.cancelled() => {
                debug!(task_id = %task_id, attempts, "Poller stopped mid-request");
                return;
            }
            outcome = inner.backend.fetch_result(&task_id) => outcome,
        };

        match outcome {
            Ok(PollOutcome::NotReady) if attempts < max_attempts => {
                debug!(task_id = %task_id, attempt = attempts, "Result not ready");
            }
            Ok(PollOutcome::NotReady) => {
                break Err(PlaygroundError::PollTimeout {
                    task_id: task_id.clone(),
                    attempts,
                });
            }
            Ok(PollOutcome::Ready(results)) => break Ok(results),
            Err(e) => break Err(e),
        }
    };

    settle(&inner, &task_id, verdict).await;
    release(&inner, &task_id);
}

async fn settle(inner: &Inner, task_id: &str, verdict: Result<Vec<JudgeResult>>) {
    let mut state = inner.state.lock().await;
    if state.active_task.as_deref() != Some(task_id) {
        debug!(task_id = %task_id, "Discarding reply for superseded task");
        return;
    }

    state.active_task = None;
    state.loading = false;

    let expected = state.submitted_count;
    let verdict = verdict.and_then(|results| {
        if results.len() == expected {
            Ok(results)
        } else {
            Err(PlaygroundError::Decode(format!(
                "judge returned {} results for {} test cases",
                results.len(),
                expected
            )))
        }
    });

    match verdict {
        Ok(results) => {
            let summary = ResultsSummary::of(&results);
            state.results = results;
            state.share_available = summary.all_passed();
            inner.set_phase(
                &mut state,
                SubmissionPhase::Settled(Settlement::Success {
                    passed: summary.passed,
                    total: summary.total,
                }),
            );
            drop(state);

            info!(
                task_id = %task_id,
                passed = summary.passed,
                total = summary.total,
                "Results received"
            );

            if summary.all_passed() {
                inner.caps.celebration.celebrate();
                inner.notify(Notice::success("Success!", "All test cases passed!"));
            }
        }
        Err(e) => {
            inner.set_phase(&mut state, SubmissionPhase::Settled(Settlement::Failure));
            drop(state);

            warn!(task_id = %task_id, error = %e, "Polling failed");
            inner.notify(Notice::error("Error", e.notice_message("Failed to fetch results")));
        }
    }
}
