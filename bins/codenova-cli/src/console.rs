// Terminal stand-ins for the browser capabilities, plus results rendering

use codenova_client::capabilities::{Celebration, Clipboard, Notifier, Viewport};
use codenova_client::error::ClipboardError;
use codenova_client::results::{verdict_label, ResultsView};
use codenova_client::{Notice, NoticeLevel, PlaygroundState};

/// Terminal columns below which results are stacked
const COMPACT_COLUMNS: u32 = 100;

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let icon = match notice.level {
            NoticeLevel::Info => "⚠️ ",
            NoticeLevel::Success => "✅",
            NoticeLevel::Error => "❌",
        };
        println!("{} {}: {}", icon, notice.title, notice.description);
    }
}

/// No system clipboard from a terminal; the link is printed instead
pub struct ConsoleClipboard;

impl Clipboard for ConsoleClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        println!("📋 {}", text);
        Ok(())
    }
}

pub struct ConfettiBurst;

impl Celebration for ConfettiBurst {
    fn celebrate(&self) {
        println!("🎉🎉🎉");
    }
}

pub struct TerminalViewport {
    columns: u32,
}

impl TerminalViewport {
    /// Width from `COLUMNS`, 80 when unset
    pub fn detect() -> Self {
        let columns = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(80);
        Self { columns }
    }

    #[cfg(test)]
    pub fn with_columns(columns: u32) -> Self {
        Self { columns }
    }
}

impl Viewport for TerminalViewport {
    fn width(&self) -> u32 {
        self.columns
    }

    fn compact_breakpoint(&self) -> u32 {
        COMPACT_COLUMNS
    }
}

fn one_line(text: &str) -> String {
    text.trim_end().replace('\n', "⏎")
}

/// Render the results panel as text
pub fn render_results(state: &PlaygroundState, viewport: &dyn Viewport) -> String {
    let results = match state.results_view() {
        ResultsView::Loading => return "⏳ Running your code...".to_string(),
        ResultsView::Empty => return "Run your code to see results here".to_string(),
        ResultsView::Ready(results) => results,
    };

    let summary = state.summary();
    let mut out = format!("Results  Passed: {}/{}\n", summary.passed, summary.total);

    for (idx, result) in results.iter().enumerate() {
        let icon = if result.success { "✓" } else { "✗" };
        out.push_str(&format!(
            "\n{} Test Case #{} - {}\n",
            icon,
            idx + 1,
            verdict_label(result)
        ));

        if viewport.is_compact() {
            out.push_str(&format!("  Input:           {}\n", one_line(&result.input)));
            out.push_str(&format!("  Expected Output: {}\n", one_line(&result.expected)));
        } else {
            out.push_str(&format!(
                "  Input: {:<30} Expected Output: {}\n",
                one_line(&result.input),
                one_line(&result.expected)
            ));
        }
        out.push_str(&format!("  Actual Output:   {}\n", one_line(&result.actual)));

        if let Some(error) = &result.error {
            out.push_str(&format!("  Error: {}\n", one_line(error)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use codenova_common::types::JudgeResult;

    fn state_with(results: Vec<JudgeResult>) -> PlaygroundState {
        let mut state = PlaygroundState::default();
        state.results = results;
        state
    }

    #[test]
    fn test_render_placeholders() {
        let viewport = TerminalViewport::with_columns(120);
        assert_eq!(
            render_results(&PlaygroundState::default(), &viewport),
            "Run your code to see results here"
        );

        let mut loading = PlaygroundState::default();
        loading.loading = true;
        assert_eq!(render_results(&loading, &viewport), "⏳ Running your code...");
    }

    #[test]
    fn test_render_results_compact() {
        let state = state_with(vec![
            JudgeResult {
                input: "2 3".to_string(),
                expected: "5".to_string(),
                actual: "5".to_string(),
                success: true,
                error: None,
            },
            JudgeResult {
                input: "1 1".to_string(),
                expected: "2".to_string(),
                actual: "".to_string(),
                success: false,
                error: Some("ReferenceError: x is not defined".to_string()),
            },
        ]);
        let text = render_results(&state, &TerminalViewport::with_columns(60));

        assert!(text.starts_with("Results  Passed: 1/2"));
        assert!(text.contains("✓ Test Case #1 - Passed"));
        assert!(text.contains("✗ Test Case #2 - Failed"));
        assert!(text.contains("  Expected Output: 2\n"));
        assert!(text.contains("Error: ReferenceError: x is not defined"));
    }

    #[test]
    fn test_viewport_breakpoint_in_columns() {
        assert!(TerminalViewport::with_columns(80).is_compact());
        assert!(!TerminalViewport::with_columns(140).is_compact());
    }
}
