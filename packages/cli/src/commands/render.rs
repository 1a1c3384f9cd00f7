use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::render_page;
use pagecraft_editor::render_preview;
use pagecraft_workspace::{export as export_project, open_document};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Project id
    pub id: String,

    /// Page to render (defaults to the current page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Project id
    pub id: String,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let store = Config::load(cwd)?.open_store(cwd)?;
    let document = open_document(&store, &args.id)?;

    let html = match &args.page {
        Some(page_id) => {
            let page = document
                .page(page_id)
                .ok_or_else(|| anyhow!("Page not found: {}", page_id))?;
            render_page(&document, page)
        }
        None => render_preview(&document),
    };

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            tracing::info!(project = %args.id, path = %path.display(), "page rendered");
            println!("{} Rendered → {}", "✓".green(), path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let store = Config::load(cwd)?.open_store(cwd)?;
    let bundle = export_project(&store, &args.id)?;

    let out_dir = PathBuf::from(cwd).join(&args.out_dir);
    bundle.write_to(&out_dir)?;
    tracing::info!(project = %args.id, dir = %out_dir.display(), "export written");

    for name in bundle.files.keys() {
        println!("  {} {}", "✓".green(), out_dir.join(name).display());
    }
    println!("{} Exported {}", "✅".green(), args.id);
    Ok(())
}
