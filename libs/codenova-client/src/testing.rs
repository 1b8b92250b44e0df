//! Scripted fakes shared by the unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use codenova_common::config::ClientConfig;
use codenova_common::types::{JudgeRequest, JudgeResult, ShareSnapshot};
use reqwest::StatusCode;

use crate::backend::{JudgeBackend, PollOutcome};
use crate::capabilities::{Capabilities, Celebration, Clipboard, Notice, Notifier};
use crate::error::{ClipboardError, Endpoint, PlaygroundError, Result};
use crate::playground::Playground;

/// Backend that replays queued replies and records every call.
///
/// Empty queues fall back to: a fresh task id for submit, not-ready for
/// polls, an in-memory store for share and load.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    submit_replies: Mutex<VecDeque<Result<String>>>,
    poll_replies: Mutex<VecDeque<Result<PollOutcome>>>,
    share_replies: Mutex<VecDeque<Result<String>>>,
    store: Mutex<HashMap<String, ShareSnapshot>>,
    submitted: Mutex<Vec<JudgeRequest>>,
    polled: Mutex<Vec<String>>,
    shared: Mutex<Vec<ShareSnapshot>>,
    loads: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn with_submit(self, reply: Result<String>) -> Self {
        self.submit_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_poll(self, reply: Result<PollOutcome>) -> Self {
        self.push_poll(reply);
        self
    }

    pub fn with_share(self, reply: Result<String>) -> Self {
        self.share_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_stored(self, share_id: &str, snapshot: ShareSnapshot) -> Self {
        self.store
            .lock()
            .unwrap()
            .insert(share_id.to_string(), snapshot);
        self
    }

    pub fn push_poll(&self, reply: Result<PollOutcome>) {
        self.poll_replies.lock().unwrap().push_back(reply);
    }

    pub fn submit_calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn submitted(&self) -> Vec<JudgeRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn polled(&self) -> Vec<String> {
        self.polled.lock().unwrap().clone()
    }

    pub fn shared(&self) -> Vec<ShareSnapshot> {
        self.shared.lock().unwrap().clone()
    }

    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }
}

#[async_trait]
impl JudgeBackend for ScriptedBackend {
    async fn submit(&self, request: &JudgeRequest) -> Result<String> {
        let count = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(request.clone());
            submitted.len()
        };
        self.submit_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("task-{}", count)))
    }

    async fn fetch_result(&self, task_id: &str) -> Result<PollOutcome> {
        self.polled.lock().unwrap().push(task_id.to_string());
        self.poll_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PollOutcome::NotReady))
    }

    async fn share(&self, snapshot: &ShareSnapshot) -> Result<String> {
        let count = {
            let mut shared = self.shared.lock().unwrap();
            shared.push(snapshot.clone());
            shared.len()
        };
        let reply = self
            .share_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("share-{}", count)));
        if let Ok(id) = &reply {
            self.store
                .lock()
                .unwrap()
                .insert(id.clone(), snapshot.clone());
        }
        reply
    }

    async fn load_share(&self, share_id: &str) -> Result<ShareSnapshot> {
        self.loads.lock().unwrap().push(share_id.to_string());
        self.store
            .lock()
            .unwrap()
            .get(share_id)
            .cloned()
            .ok_or(PlaygroundError::Status {
                endpoint: Endpoint::LoadShare,
                status: StatusCode::NOT_FOUND,
            })
    }
}

/// Capabilities that remember what the workflow asked of them
#[derive(Default)]
pub(crate) struct RecordingCaps {
    notices: Mutex<Vec<Notice>>,
    celebrations: AtomicUsize,
    clipboard: Mutex<Option<String>>,
    clipboard_error: Mutex<Option<ClipboardError>>,
}

impl RecordingCaps {
    pub fn capabilities(self: &Arc<Self>) -> Capabilities {
        Capabilities {
            notifier: self.clone(),
            clipboard: self.clone(),
            celebration: self.clone(),
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn celebrations(&self) -> usize {
        self.celebrations.load(Ordering::SeqCst)
    }

    pub fn clipboard_contents(&self) -> Option<String> {
        self.clipboard.lock().unwrap().clone()
    }

    pub fn fail_clipboard(&self, error: ClipboardError) {
        *self.clipboard_error.lock().unwrap() = Some(error);
    }
}

impl Notifier for RecordingCaps {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

impl Clipboard for RecordingCaps {
    fn write_text(&self, text: &str) -> std::result::Result<(), ClipboardError> {
        if let Some(error) = self.clipboard_error.lock().unwrap().clone() {
            return Err(error);
        }
        *self.clipboard.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

impl Celebration for RecordingCaps {
    fn celebrate(&self) {
        self.celebrations.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn scripted_playground(
    backend: ScriptedBackend,
) -> (Playground, Arc<ScriptedBackend>, Arc<RecordingCaps>) {
    scripted_playground_with(backend, ClientConfig::default())
}

pub(crate) fn scripted_playground_with(
    backend: ScriptedBackend,
    config: ClientConfig,
) -> (Playground, Arc<ScriptedBackend>, Arc<RecordingCaps>) {
    let backend = Arc::new(backend);
    let caps = Arc::new(RecordingCaps::default());
    let playground = Playground::new(backend.clone(), caps.capabilities(), config);
    (playground, backend, caps)
}

pub(crate) fn judge_result(input: &str, expected: &str, actual: &str, success: bool) -> JudgeResult {
    JudgeResult {
        input: input.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
        success,
        error: None,
    }
}
