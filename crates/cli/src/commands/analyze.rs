//! `meetagent analyze` — Run the agent once over a transcript.
//!
//! The transcript comes from a file argument, `--text`, or stdin. Each
//! progress event is printed as it arrives; an `error` terminal makes
//! the command exit non-zero.

use std::path::PathBuf;
use std::sync::Arc;

use meetagent_agent::{AgentEvent, AgentRunner};
use meetagent_config::AppConfig;
use meetagent_core::provider::Provider;

pub async fn run(
    file: Option<PathBuf>,
    text: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    if config.api_key.is_none() && config.providers.values().all(|p| p.api_key.is_none()) {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export OPENROUTER_API_KEY='sk-or-v1-...'   (recommended)");
        eprintln!("    export OPENAI_API_KEY='sk-...'             (for OpenAI direct)");
        eprintln!("    export MEETAGENT_API_KEY='sk-...'          (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        eprintln!("  Get an OpenRouter key at: https://openrouter.ai/keys");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let transcript = read_transcript(file, text)?;
    if transcript.trim().is_empty() {
        return Err("Transcript is empty".into());
    }

    let provider: Arc<dyn Provider> = Arc::new(meetagent_providers::from_config(&config));
    let model = meetagent_providers::model_from_config(&config);
    let tools = Arc::new(meetagent_tools::default_registry());
    let runner = Arc::new(AgentRunner::new(provider, model.clone(), tools));

    println!("{}", "=".repeat(60));
    println!(
        "Analyzing transcript ({} chars) with {model}...",
        transcript.len()
    );
    println!("{}", "=".repeat(60));

    let mut failed = false;
    let mut rx = runner.run_stream(transcript);
    while let Some(event) = rx.recv().await {
        print_event(&event);
        if matches!(event, AgentEvent::Error { .. }) {
            failed = true;
        }
    }

    println!("\n{}", "=".repeat(60));
    if failed {
        return Err("Analysis failed. See above for details.".into());
    }
    println!("Done!");

    Ok(())
}

/// Resolve the transcript text: explicit `--text`, a file, or stdin.
fn read_transcript(
    file: Option<PathBuf>,
    text: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()).into());
    }
    use std::io::Read;
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn print_event(event: &AgentEvent) {
    match event {
        AgentEvent::Thinking { content } => println!("\n[Thinking] {content}"),
        AgentEvent::ToolCall { tool, arguments } => {
            let keys: Vec<&str> = arguments
                .as_object()
                .map(|o| o.keys().map(String::as_str).collect())
                .unwrap_or_default();
            println!("\n[Tool Call] {tool}({})", keys.join(", "));
        }
        AgentEvent::ToolResult { result, .. } => {
            let artifact_type = result["type"].as_str().unwrap_or("unknown");
            println!("[Tool Result] type={artifact_type}");
            if let Some(markdown) = result["markdown"].as_str() {
                println!("{}", excerpt(markdown, 200));
            } else if let Some(details) = result.get("event_details") {
                println!("  Event: {details}");
            } else if let Some(error) = result["error"].as_str() {
                println!("  Error: {error}");
            }
        }
        AgentEvent::Final { content } => println!("\n[Final] {content}"),
        AgentEvent::Error { content } => println!("\n[ERROR] {content}"),
    }
}

/// First `max` characters of `s`, with a trailing ellipsis when cut.
fn excerpt(s: &str, max: usize) -> String {
    let mut chars = s.char_indices();
    match chars.nth(max) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}
