//! Submission and result-polling workflow for the CodeNova playground.
//!
//! A [`Playground`] owns the editor state (code, language, test cases,
//! results) and drives it through the judge backend: submit, poll until
//! the results land, share a passing run, and restore a shared one.

pub mod backend;
pub mod capabilities;
pub mod error;
mod loader;
pub mod playground;
mod poller;
pub mod results;
mod share;
mod submission;
pub mod test_cases;

#[cfg(test)]
mod testing;

pub use backend::{HttpBackend, JudgeBackend, PollOutcome};
pub use capabilities::{Capabilities, Notice, NoticeLevel};
pub use error::{PlaygroundError, Result};
pub use playground::{Playground, PlaygroundState, Settlement, SubmissionPhase};
