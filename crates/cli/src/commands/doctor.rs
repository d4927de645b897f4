//! `meetagent doctor` — Diagnose system health.

use std::sync::Arc;

use meetagent_config::AppConfig;
use meetagent_core::provider::Provider;
use meetagent_storage::MeetingStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Meeting Agent Doctor — System Diagnostics");
    println!("============================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found");
    } else {
        println!("  ⚠️  No config file — run `meetagent onboard` (defaults in use)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue found. Fix the config before re-running doctor.");
            return Ok(());
        }
    };

    // Check API key
    let has_key =
        config.api_key.is_some() || config.providers.values().any(|p| p.api_key.is_some());
    if has_key {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key — add api_key to config.toml or export OPENROUTER_API_KEY");
        issues += 1;
    }

    // Check provider reachability
    let provider: Arc<dyn Provider> = Arc::new(meetagent_providers::from_config(&config));
    match provider.health_check().await {
        Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
        Ok(false) => {
            println!("  ⚠️  Provider '{}' unreachable", provider.name());
            issues += 1;
        }
        Err(e) => {
            println!("  ⚠️  Provider '{}' check failed: {e}", provider.name());
            issues += 1;
        }
    }

    // Check database
    match MeetingStore::open(&config.storage.db_path).await {
        Ok(store) => {
            let count = store.count().await.unwrap_or(0);
            println!(
                "  ✅ Database OK ({count} meeting(s) at {})",
                config.storage.db_path.display()
            );
        }
        Err(e) => {
            println!("  ❌ Database unavailable: {e}");
            issues += 1;
        }
    }

    // Check tools
    let tools = meetagent_tools::default_registry();
    if tools.len() == 6 {
        println!("  ✅ All 6 tools registered");
    } else {
        println!("  ❌ Expected 6 tools, found {}", tools.len());
        issues += 1;
    }

    // Transcription is optional; just report its state
    let whisper = meetagent_providers::WhisperTranscriber::from_config(&config.transcription);
    if whisper.is_configured() {
        println!("  ✅ Transcription key configured");
    } else {
        println!("  ℹ️  No transcription key — audio uploads will fail (export GROQ_API_KEY)");
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
