use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_workspace::publish as publish_project;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Project id
    pub id: String,

    /// Base url for the share link (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn publish(args: PublishArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.open_store(cwd)?;
    let base_url = args.base_url.unwrap_or(config.share_base_url);

    let url = publish_project(&store, &args.id, &base_url)?;
    println!("{} Published! Share URL:", "✅".green());
    println!("{}", url.bright_white().underline());
    Ok(())
}
