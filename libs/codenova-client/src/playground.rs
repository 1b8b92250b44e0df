use std::sync::{Arc, Mutex as StdMutex};

use codenova_common::config::ClientConfig;
use codenova_common::types::{JudgeResult, Language, TestCase, TestCaseField, DEFAULT_CODE};
use tokio::sync::{watch, Mutex};

use crate::backend::{HttpBackend, JudgeBackend};
use crate::capabilities::{Capabilities, Notice};
use crate::error::Result;
use crate::poller::{self, PollerHandle};
use crate::results::{ResultsSummary, ResultsView};
use crate::test_cases::TestCaseStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Results arrived; says nothing about whether they passed
    Success { passed: usize, total: usize },
    Failure,
}

/// Where the current submission stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Polling { task_id: String },
    Settled(Settlement),
}

impl SubmissionPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionPhase::Validating | SubmissionPhase::Submitting | SubmissionPhase::Polling { .. }
        )
    }
}

/// Everything the editor, test-case and results panels render from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundState {
    pub code: String,
    pub language: Language,
    pub test_cases: TestCaseStore,
    pub results: Vec<JudgeResult>,
    pub loading: bool,
    pub share_available: bool,
    /// Task being polled, if any
    pub active_task: Option<String>,
    pub phase: SubmissionPhase,
    /// Share id of the current navigation context
    pub share_id: Option<String>,
    pub(crate) submitted_count: usize,
    pub(crate) submission_seq: u64,
}

impl Default for PlaygroundState {
    fn default() -> Self {
        Self {
            code: DEFAULT_CODE.to_string(),
            language: Language::default(),
            test_cases: TestCaseStore::default(),
            results: Vec::new(),
            loading: false,
            share_available: false,
            active_task: None,
            phase: SubmissionPhase::Idle,
            share_id: None,
            submitted_count: 0,
            submission_seq: 0,
        }
    }
}

impl PlaygroundState {
    pub fn results_view(&self) -> ResultsView<'_> {
        ResultsView::new(self.loading, &self.results)
    }

    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary::of(&self.results)
    }
}

pub(crate) struct Inner {
    pub(crate) backend: Arc<dyn JudgeBackend>,
    pub(crate) caps: Capabilities,
    pub(crate) config: ClientConfig,
    pub(crate) state: Mutex<PlaygroundState>,
    pub(crate) poller: StdMutex<Option<PollerHandle>>,
    phase_tx: watch::Sender<SubmissionPhase>,
}

impl Inner {
    pub(crate) fn set_phase(&self, state: &mut PlaygroundState, phase: SubmissionPhase) {
        state.phase = phase.clone();
        self.phase_tx.send_replace(phase);
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.caps.notifier.notify(notice);
    }
}

/// Handle to one playground session.
///
/// Dropping it tears the session down and stops any polling in flight.
pub struct Playground {
    pub(crate) inner: Arc<Inner>,
}

impl Playground {
    pub fn new(backend: Arc<dyn JudgeBackend>, caps: Capabilities, config: ClientConfig) -> Self {
        let (phase_tx, _) = watch::channel(SubmissionPhase::Idle);
        Self {
            inner: Arc::new(Inner {
                backend,
                caps,
                config,
                state: Mutex::new(PlaygroundState::default()),
                poller: StdMutex::new(None),
                phase_tx,
            }),
        }
    }

    /// Session talking to the judge over HTTP
    pub fn with_http(config: ClientConfig, caps: Capabilities) -> Result<Self> {
        let backend = HttpBackend::new(&config)?;
        Ok(Self::new(Arc::new(backend), caps, config))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Copy of the current state
    pub async fn state(&self) -> PlaygroundState {
        self.inner.state.lock().await.clone()
    }

    pub async fn set_code(&self, code: impl Into<String>) {
        self.inner.state.lock().await.code = code.into();
    }

    pub async fn set_language(&self, language: Language) {
        self.inner.state.lock().await.language = language;
    }

    pub async fn add_test_case(&self) {
        self.inner.state.lock().await.test_cases.add();
    }

    pub async fn remove_test_case(&self, index: usize) -> bool {
        self.inner.state.lock().await.test_cases.remove(index)
    }

    pub async fn update_test_case(&self, index: usize, field: TestCaseField, value: impl Into<String>) {
        self.inner
            .state
            .lock()
            .await
            .test_cases
            .update(index, field, value);
    }

    pub async fn set_test_cases(&self, cases: Vec<TestCase>) {
        self.inner.state.lock().await.test_cases.replace_all(cases);
    }

    /// Wait until no submission is in flight and return the phase it ended in
    pub async fn wait_settled(&self) -> SubmissionPhase {
        let mut rx = self.inner.phase_tx.subscribe();
        let phase = match rx.wait_for(|phase| !phase.is_in_flight()).await {
            Ok(phase) => phase.clone(),
            Err(_) => SubmissionPhase::Idle,
        };
        phase
    }

    /// Stop any polling in flight
    pub fn shutdown(&self) {
        poller::rearm(&self.inner, None);
    }
}

impl Drop for Playground {
    fn drop(&mut self) {
        self.shutdown();
    }
}
