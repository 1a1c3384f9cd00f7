mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, delete, export, init, list, new, publish, render, show, ApplyArgs, DeleteArgs,
    ExportArgs, InitArgs, NewArgs, PublishArgs, RenderArgs, ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - build and publish landing pages
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a pagecraft.config.json
    Init(InitArgs),

    /// Create a project
    New(NewArgs),

    /// List projects
    List,

    /// Print a project's pages and elements
    Show(ShowArgs),

    /// Replay a JSON mutation script against a project
    Apply(ApplyArgs),

    /// Render a page to HTML
    Render(RenderArgs),

    /// Export a project as static files
    Export(ExportArgs),

    /// Publish a project and print its share url
    Publish(PublishArgs),

    /// Delete a project
    Delete(DeleteArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::New(args) => new(args, &cwd),
                Command::List => list(&cwd),
                Command::Show(args) => show(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
                Command::Render(args) => render(args, &cwd),
                Command::Export(args) => export(args, &cwd),
                Command::Publish(args) => publish(args, &cwd),
                Command::Delete(args) => delete(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
