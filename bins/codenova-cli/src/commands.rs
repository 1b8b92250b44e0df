// CLI commands driving the playground workflow
use anyhow::{anyhow, bail, Context, Result};
use codenova_client::capabilities::Capabilities;
use codenova_client::{Playground, Settlement, SubmissionPhase};
use codenova_common::api;
use codenova_common::config::ClientConfig;
use codenova_common::types::{Language, TestCase};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::console::{self, ConfettiBurst, ConsoleClipboard, ConsoleNotifier, TerminalViewport};
use crate::BackendArgs;

/// Accepted layouts of a cases file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CasesFile {
    List(Vec<TestCase>),
    Wrapped {
        #[serde(rename = "testCases")]
        test_cases: Vec<TestCase>,
    },
}

/// Resolve client configuration: environment first, flags on top
pub fn client_config(args: &BackendArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid CODENOVA_* environment")?;

    if let Some(url) = &args.api_url {
        config.api_url = url.clone();
    }
    if let Some(origin) = &args.share_origin {
        config.share_origin = origin.clone();
    }
    if let Some(ms) = args.poll_interval_ms {
        if ms == 0 {
            bail!("--poll-interval-ms must be greater than zero");
        }
        config.poll_interval = Duration::from_millis(ms);
    }
    if let Some(attempts) = args.max_poll_attempts {
        if attempts == 0 {
            bail!("--max-poll-attempts must be greater than zero");
        }
        config.max_poll_attempts = attempts;
    }

    Ok(config)
}

fn console_capabilities() -> Capabilities {
    Capabilities {
        notifier: Arc::new(ConsoleNotifier),
        clipboard: Arc::new(ConsoleClipboard),
        celebration: Arc::new(ConfettiBurst),
    }
}

/// Parse `INPUT::EXPECTED`, turning literal `\n` into line breaks
pub fn parse_case(raw: &str) -> Result<TestCase> {
    let (input, expected) = raw
        .split_once("::")
        .ok_or_else(|| anyhow!("Test case '{}' must look like INPUT::EXPECTED", raw))?;
    Ok(TestCase::new(
        input.replace("\\n", "\n"),
        expected.replace("\\n", "\n"),
    ))
}

/// Load test cases from a JSON file
pub fn load_cases_file(path: &Path) -> Result<Vec<TestCase>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: CasesFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(match parsed {
        CasesFile::List(cases) => cases,
        CasesFile::Wrapped { test_cases } => test_cases,
    })
}

/// Guess the language from a source file extension
pub fn infer_language(path: &Path) -> Option<Language> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "js" | "mjs" | "cjs" => Some(Language::JavaScript),
        "py" => Some(Language::Python),
        _ => None,
    }
}

/// Submit a source file and print the verdict.
///
/// Returns whether every test case passed.
pub async fn run_code(
    config: ClientConfig,
    file: &Path,
    language: Option<Language>,
    raw_cases: &[String],
    cases_file: Option<&Path>,
    share: bool,
) -> Result<bool> {
    let code = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let language = language.or_else(|| infer_language(file)).unwrap_or_default();

    let mut cases = match cases_file {
        Some(path) => load_cases_file(path)?,
        None => Vec::new(),
    };
    for raw in raw_cases {
        cases.push(parse_case(raw)?);
    }
    if cases.is_empty() {
        bail!("At least one test case is required (--case or --cases-file)");
    }

    let case_count = cases.len();
    let playground = Playground::with_http(config, console_capabilities())
        .context("Failed to create judge client")?;
    playground.set_code(code).await;
    playground.set_language(language).await;
    playground.set_test_cases(cases).await;

    println!(
        "🚀 Submitting {} as {} ({} test case{})",
        file.display(),
        language,
        case_count,
        if case_count == 1 { "" } else { "s" }
    );

    let task_id = playground.submit().await?;
    info!(task_id = %task_id, language = %language, "Waiting for results");
    println!("⏳ Running your code...");

    let phase = playground.wait_settled().await;
    let state = playground.state().await;
    println!("{}", console::render_results(&state, &TerminalViewport::detect()));

    let all_passed = match phase {
        SubmissionPhase::Settled(Settlement::Success { passed, total }) => passed == total,
        SubmissionPhase::Settled(Settlement::Failure) => bail!("Judging failed for task {}", task_id),
        other => bail!("Submission ended unexpectedly in {:?}", other),
    };

    if share {
        if state.share_available {
            let link = playground.share().await?;
            println!("\n🔗 Share link: {}", link);
        } else {
            println!("\n⚠️  Not sharing: only runs where every test case passes can be shared");
        }
    }

    Ok(all_passed)
}

/// Restore a shared run and print it
pub async fn load_shared(config: ClientConfig, share: &str, out: Option<&Path>) -> Result<()> {
    let share_id = api::share_id_from_link(share)
        .ok_or_else(|| anyhow!("'{}' is not a share id or link", share))?;

    let playground = Playground::with_http(config, console_capabilities())
        .context("Failed to create judge client")?;
    playground.navigate(Some(share_id)).await?;

    let state = playground.state().await;
    println!("📦 Shared run {}", share_id);
    println!("Language: {}", state.language);
    println!("\n{}\n", state.code);
    for (idx, case) in state.test_cases.as_slice().iter().enumerate() {
        println!("Test Case #{}", idx + 1);
        println!("  Input:           {}", case.input.replace('\n', "⏎"));
        println!("  Expected Output: {}", case.expected_output.replace('\n', "⏎"));
    }

    if let Some(path) = out {
        fs::write(path, &state.code)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\n✅ Source written to {}", path.display());
    }

    Ok(())
}

pub fn list_languages() {
    println!("Supported languages:");
    for language in Language::ALL {
        println!("  - {}", language);
    }
}
