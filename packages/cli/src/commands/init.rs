use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for project files
    #[arg(short, long, default_value = ".pagecraft")]
    pub data_dir: String,

    /// Base url used for share links
    #[arg(long, default_value = "http://localhost:4000")]
    pub share_base_url: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagecraft...".bright_blue().bold());

    let config = Config {
        data_dir: args.data_dir.clone(),
        share_base_url: args.share_base_url,
        ..Config::default()
    };

    let data_dir = config.get_data_dir(cwd);
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
        println!("  {} Created {}/", "✓".green(), args.data_dir);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft new \"My site\"");
    println!("  2. Run: pagecraft apply <id> edits.json");
    println!("  3. Run: pagecraft export <id>");

    Ok(())
}
