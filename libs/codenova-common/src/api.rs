//! Judge backend routes - defines only the URL layout, not transport
//! Keeps the client and any mock server agreeing on the same paths

pub const JUDGE_PATH: &str = "/api/judge";
pub const RESULT_PREFIX: &str = "/api/result";
pub const SHARE_PATH: &str = "/api/share";

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// URL for submitting a batch of test cases
pub fn judge_url(base: &str) -> String {
    join(base, JUDGE_PATH)
}

/// URL for polling the outcome of a task
pub fn result_url(base: &str, task_id: &str) -> String {
    join(base, &format!("{}/{}", RESULT_PREFIX, task_id))
}

/// URL for persisting a snapshot
pub fn share_url(base: &str) -> String {
    join(base, SHARE_PATH)
}

/// URL for fetching a persisted snapshot
pub fn share_snapshot_url(base: &str, share_id: &str) -> String {
    join(base, &format!("{}/{}", SHARE_PATH, share_id))
}

/// Link handed to the user; navigating to it restores the snapshot
pub fn share_link(origin: &str, share_id: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), share_id)
}

/// Extract a share id from either a bare id or a full share link.
///
/// Query and fragment are ignored.
pub fn share_id_from_link(link: &str) -> Option<&str> {
    let link = link.trim();
    let path = match link.find(|c: char| c == '?' || c == '#') {
        Some(end) => &link[..end],
        None => link,
    };
    let id = path.trim_end_matches('/').rsplit('/').next()?;
    if id.is_empty() || id.contains(':') {
        None
    } else {
        Some(id)
    }
}
