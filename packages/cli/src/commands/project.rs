use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_workspace::{open_document, ProjectStore};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name
    #[arg(default_value = "Untitled Project")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Project id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Project id
    pub id: String,
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let store = Config::load(cwd)?.open_store(cwd)?;
    let id = store.create(&args.name)?;

    println!("{} Created {}", "✓".green(), args.name.bright_white());
    println!("{}", id);
    Ok(())
}

pub fn list(cwd: &str) -> Result<()> {
    let store = Config::load(cwd)?.open_store(cwd)?;
    let projects = store.list()?;

    if projects.is_empty() {
        println!("{}", "No projects yet".yellow());
        return Ok(());
    }

    for project in projects {
        let published = if project.published_token.is_some() {
            " (published)".cyan().to_string()
        } else {
            String::new()
        };
        println!(
            "  {}  {}{}  {}",
            project.id.dimmed(),
            project.name.bright_white(),
            published,
            project.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }
    Ok(())
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let store = Config::load(cwd)?.open_store(cwd)?;
    let document = open_document(&store, &args.id)?;
    let current = document.current_page().map(|page| page.id.clone());

    println!("{}", document.name.bright_white().bold());
    println!(
        "  theme: {} / {}px radius",
        document.theme.primary, document.theme.radius
    );

    for page in &document.pages {
        let marker = if current.as_deref() == Some(page.id.as_str()) {
            "▸".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {} {} ({} elements)",
            marker,
            page.name,
            page.id.dimmed(),
            page.elements.len()
        );
        for element in &page.elements {
            let label = element
                .content
                .as_deref()
                .or(element.title.as_deref())
                .or(element.name.as_deref())
                .unwrap_or("");
            println!(
                "      {} {:<8} {}",
                element.id.dimmed(),
                element.kind.to_string().cyan(),
                label
            );
        }
    }

    println!(
        "  {} reusable, {} assets",
        document.reusable_components.len(),
        document.assets.len()
    );
    Ok(())
}

pub fn delete(args: DeleteArgs, cwd: &str) -> Result<()> {
    let store = Config::load(cwd)?.open_store(cwd)?;
    store.delete(&args.id)?;
    println!("{} Deleted {}", "✓".green(), args.id);
    Ok(())
}
