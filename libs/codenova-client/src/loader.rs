use codenova_common::types::ShareSnapshot;
use tracing::{error, info};

use crate::capabilities::Notice;
use crate::error::Result;
use crate::playground::Playground;

impl Playground {
    /// Follow the share id of the current navigation context.
    ///
    /// Loads only when the id differs from the last one seen; `None` clears
    /// the remembered id without touching the editor.
    pub async fn navigate(&self, share_id: Option<&str>) -> Result<()> {
        let share_id = share_id.map(str::trim).filter(|id| !id.is_empty());
        {
            let mut state = self.inner.state.lock().await;
            if state.share_id.as_deref() == share_id {
                return Ok(());
            }
            state.share_id = share_id.map(str::to_string);
        }

        match share_id {
            Some(id) => self.load_share(id).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Fetch a shared snapshot and restore the editor and test cases from it.
    ///
    /// Results are reset rather than restored. On failure the editor is left
    /// as it was.
    pub async fn load_share(&self, share_id: &str) -> Result<ShareSnapshot> {
        self.inner.state.lock().await.loading = true;

        let reply = self.inner.backend.load_share(share_id).await;

        let mut state = self.inner.state.lock().await;
        state.loading = false;
        match reply {
            Ok(snapshot) => {
                state.language = snapshot.language;
                state.code = snapshot.code.clone();
                state.test_cases.replace_all(snapshot.test_cases.clone());
                state.results.clear();
                state.share_available = false;
                drop(state);

                info!(
                    share_id = %share_id,
                    language = %snapshot.language,
                    test_cases = snapshot.test_cases.len(),
                    "Shared snapshot restored"
                );
                Ok(snapshot)
            }
            Err(e) => {
                drop(state);
                error!(share_id = %share_id, error = %e, "Failed to load shared snapshot");
                self.inner.notify(Notice::error(
                    "Error",
                    e.notice_message("Failed to fetch shared results"),
                ));
                Err(e)
            }
        }
    }
}
