//! `meetagent onboard` — First-time setup wizard.

use meetagent_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("📋 Meeting Agent — First-Time Setup");
    println!("===================================\n");

    // Create the config directory (also holds the meetings database)
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    // Create config file
    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        let default_toml = AppConfig::default_toml();
        std::fs::write(&config_path, &default_toml)?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Edit {} and add your API key", config_path.display());
        println!("      (or export OPENROUTER_API_KEY)");
        println!("   2. Run: meetagent analyze meeting.txt");
        println!("   3. Or start the API server: meetagent gateway\n");
    }

    println!("🎉 Setup complete! Run `meetagent analyze` to process a transcript.\n");

    Ok(())
}
