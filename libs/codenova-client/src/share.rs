use codenova_common::api;
use codenova_common::types::ShareSnapshot;
use tracing::{error, info};

use crate::capabilities::Notice;
use crate::error::{PlaygroundError, Result};
use crate::playground::Playground;

impl Playground {
    /// Persist the current run and copy its link to the clipboard.
    ///
    /// Only allowed after a run where every test case passed. Returns the
    /// link that was copied.
    pub async fn share(&self) -> Result<String> {
        let snapshot = {
            let mut state = self.inner.state.lock().await;
            if !state.share_available {
                return Err(PlaygroundError::ShareUnavailable);
            }
            state.loading = true;
            ShareSnapshot {
                code: state.code.clone(),
                language: state.language,
                test_cases: state.test_cases.to_vec(),
                results: state.results.clone(),
            }
        };

        let reply = self.inner.backend.share(&snapshot).await;
        self.inner.state.lock().await.loading = false;

        let outcome = reply.and_then(|share_id| {
            let link = api::share_link(&self.inner.config.share_origin, &share_id);
            self.inner.caps.clipboard.write_text(&link)?;
            info!(share_id = %share_id, "Snapshot shared");
            Ok(link)
        });

        match outcome {
            Ok(link) => {
                self.inner
                    .notify(Notice::success("Results Shared", "Link copied to clipboard!"));
                Ok(link)
            }
            Err(e) => {
                error!(error = %e, "Sharing failed");
                self.inner
                    .notify(Notice::error("Error", e.notice_message("Failed to share results")));
                Err(e)
            }
        }
    }
}
