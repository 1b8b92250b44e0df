use codenova_common::types::JudgeResult;

/// What the results panel should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView<'a> {
    Loading,
    Empty,
    Ready(&'a [JudgeResult]),
}

impl<'a> ResultsView<'a> {
    pub fn new(loading: bool, results: &'a [JudgeResult]) -> Self {
        if loading {
            ResultsView::Loading
        } else if results.is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Ready(results)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsSummary {
    pub passed: usize,
    pub total: usize,
}

impl ResultsSummary {
    pub fn of(results: &[JudgeResult]) -> Self {
        Self {
            passed: results.iter().filter(|r| r.success).count(),
            total: results.len(),
        }
    }

    /// A run with no results never counts as passing
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}

pub fn verdict_label(result: &JudgeResult) -> &'static str {
    if result.success {
        "Passed"
    } else {
        "Failed"
    }
}
