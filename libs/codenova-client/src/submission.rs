use codenova_common::types::JudgeRequest;
use tracing::{debug, error, info};

use crate::capabilities::Notice;
use crate::error::{PlaygroundError, Result};
use crate::playground::{Playground, Settlement, SubmissionPhase};
use crate::poller;

impl Playground {
    /// Validate the test cases, submit them and start polling.
    ///
    /// Returns the task id being polled. Incomplete test cases are rejected
    /// before anything is sent.
    pub async fn submit(&self) -> Result<String> {
        let (request, seq) = {
            let mut state = self.inner.state.lock().await;
            self.inner.set_phase(&mut state, SubmissionPhase::Validating);

            if let Some(index) = state.test_cases.first_incomplete() {
                self.inner.set_phase(&mut state, SubmissionPhase::Idle);
                drop(state);
                debug!(index, "Submission blocked by incomplete test case");
                self.inner.notify(Notice::info(
                    "Incomplete Test Cases",
                    "Please fill in all test cases with input and expected output.",
                ));
                return Err(PlaygroundError::IncompleteTestCases { index });
            }

            state.submission_seq += 1;
            state.results.clear();
            state.loading = true;
            state.share_available = false;
            state.active_task = None;
            state.submitted_count = state.test_cases.len();
            self.inner.set_phase(&mut state, SubmissionPhase::Submitting);

            let request = JudgeRequest {
                code: state.code.clone(),
                language: state.language,
                test_cases: state.test_cases.to_vec(),
            };
            (request, state.submission_seq)
        };

        // Replies for an earlier task must not land after this point
        poller::rearm(&self.inner, None);

        info!(
            language = %request.language,
            test_cases = request.test_cases.len(),
            source_size = request.code.len(),
            "Submitting code"
        );

        let reply = self.inner.backend.submit(&request).await;

        let mut state = self.inner.state.lock().await;
        if state.submission_seq != seq {
            debug!("Dropping reply for superseded submission");
            return Err(PlaygroundError::Superseded);
        }

        match reply {
            Ok(task_id) => {
                info!(task_id = %task_id, "Submission accepted");
                state.active_task = Some(task_id.clone());
                self.inner.set_phase(
                    &mut state,
                    SubmissionPhase::Polling {
                        task_id: task_id.clone(),
                    },
                );
                drop(state);

                poller::rearm(&self.inner, Some(&task_id));
                Ok(task_id)
            }
            Err(e) => {
                state.loading = false;
                self.inner.set_phase(&mut state, SubmissionPhase::Settled(Settlement::Failure));
                drop(state);

                error!(error = %e, "Submission failed");
                self.inner.notify(Notice::error(
                    "Submission Error",
                    e.notice_message("Failed to submit code"),
                ));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use codenova_common::types::{Language, TestCase, TestCaseField};

    use crate::backend::PollOutcome;
    use crate::capabilities::NoticeLevel;
    use crate::error::{Endpoint, PlaygroundError};
    use crate::playground::{Settlement, SubmissionPhase};
    use crate::testing::{judge_result, scripted_playground, ScriptedBackend};

    #[tokio::test]
    async fn test_blank_default_case_is_blocked() {
        let (playground, backend, caps) = scripted_playground(ScriptedBackend::default());

        let err = playground.submit().await.unwrap_err();
        assert!(matches!(err, PlaygroundError::IncompleteTestCases { index: 0 }));
        assert_eq!(backend.submit_calls(), 0);
        assert_eq!(playground.state().await.phase, SubmissionPhase::Idle);
        assert_eq!(caps.last_notice().unwrap().title, "Incomplete Test Cases");
    }

    #[tokio::test]
    async fn test_missing_expected_output_is_blocked() {
        let (playground, backend, _caps) = scripted_playground(ScriptedBackend::default());
        playground
            .set_test_cases(vec![TestCase::new("2 3", "5"), TestCase::new("4 4", "")])
            .await;

        let err = playground.submit().await.unwrap_err();
        assert!(matches!(err, PlaygroundError::IncompleteTestCases { index: 1 }));
        assert_eq!(backend.submit_calls(), 0);
        assert!(backend.polled().is_empty());
        assert!(!playground.state().await.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_carries_editor_state() {
        let backend = ScriptedBackend::default()
            .with_poll(Ok(PollOutcome::Ready(vec![judge_result("2 3", "5", "5", true)])));
        let (playground, backend, _caps) = scripted_playground(backend);
        playground.set_code("print(sum(map(int, input().split())))").await;
        playground.set_language(Language::Python).await;
        playground.update_test_case(0, TestCaseField::Input, "2 3").await;
        playground.update_test_case(0, TestCaseField::ExpectedOutput, "5").await;

        playground.submit().await.unwrap();
        playground.wait_settled().await;

        let requests = backend.submitted();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].language, Language::Python);
        assert_eq!(requests[0].code, "print(sum(map(int, input().split())))");
        assert_eq!(requests[0].test_cases, vec![TestCase::new("2 3", "5")]);
    }

    #[tokio::test]
    async fn test_submit_failure_clears_loading() {
        let backend = ScriptedBackend::default().with_submit(Err(PlaygroundError::Status {
            endpoint: Endpoint::Judge,
            status: reqwest::StatusCode::BAD_GATEWAY,
        }));
        let (playground, backend, caps) = scripted_playground(backend);
        playground.set_test_cases(vec![TestCase::new("1", "1")]).await;

        assert!(playground.submit().await.is_err());
        let state = playground.state().await;
        assert!(!state.loading);
        assert_eq!(state.active_task, None);
        assert_eq!(state.phase, SubmissionPhase::Settled(Settlement::Failure));
        assert!(backend.polled().is_empty());

        let notice = caps.last_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "Submission Error");
        assert_eq!(notice.description, "Failed to submit code");
    }

    #[tokio::test]
    async fn test_submit_failure_shows_underlying_message() {
        let backend = ScriptedBackend::default()
            .with_submit(Err(PlaygroundError::Decode("missing field `taskId`".to_string())));
        let (playground, _backend, caps) = scripted_playground(backend);
        playground.set_test_cases(vec![TestCase::new("1", "1")]).await;

        assert!(playground.submit().await.is_err());
        assert_eq!(
            caps.last_notice().unwrap().description,
            "unexpected response: missing field `taskId`"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmit_clears_previous_results_and_share() {
        let backend = ScriptedBackend::default()
            .with_poll(Ok(PollOutcome::Ready(vec![judge_result("1", "1", "1", true)])));
        let (playground, _backend, _caps) = scripted_playground(backend);
        playground.set_test_cases(vec![TestCase::new("1", "1")]).await;
        playground.submit().await.unwrap();
        playground.wait_settled().await;
        assert!(playground.state().await.share_available);

        playground.submit().await.unwrap();
        let state = playground.state().await;
        assert!(state.results.is_empty());
        assert!(state.loading);
        assert!(!state.share_available);
        assert!(matches!(state.phase, SubmissionPhase::Polling { .. }));
    }
}
