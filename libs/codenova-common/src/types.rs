use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source shown in a fresh editor before the user types anything
pub const DEFAULT_CODE: &str = "// Write your code here";

/// Languages the judge accepts for authoring.
///
/// Closed set: anything else is rejected before it can reach the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::Python];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}' (expected one of: javascript, python)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// A user-authored input / expected-output pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Both sides must be filled before the case can be judged
    pub fn is_complete(&self) -> bool {
        !self.input.is_empty() && !self.expected_output.is_empty()
    }
}

/// Which side of a test case an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCaseField {
    Input,
    ExpectedOutput,
}

/// Backend verdict for one submitted test case, positionally aligned
/// with the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeResult {
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/judge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRequest {
    pub code: String,
    pub language: Language,
    pub test_cases: Vec<TestCase>,
}

/// Reply of both `POST /api/judge` and `POST /api/share`.
///
/// The share endpoint reuses the `taskId` field for the share id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task_id: String,
}

/// Bundle persisted by `POST /api/share` and returned by `GET /api/share/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSnapshot {
    pub code: String,
    pub language: Language,
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub results: Vec<JudgeResult>,
}
