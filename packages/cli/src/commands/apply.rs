use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{EditSession, Mutation};
use pagecraft_workspace::{open_document, Autosaver, ProjectStore, SaveStatus};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Project id
    pub id: String,

    /// JSON file holding an array of mutations
    pub script: PathBuf,

    /// Autosave delay in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store: Arc<dyn ProjectStore> = Arc::new(config.open_store(cwd)?);
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.autosave_delay());

    let script = fs::read_to_string(&args.script)?;
    let mutations = Mutation::parse_script(&script)
        .map_err(|e| anyhow!("Invalid mutation script {}: {}", args.script.display(), e))?;

    let document = open_document(store.as_ref(), &args.id)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let status = runtime.block_on(async {
        let autosaver = Autosaver::spawn(store.clone(), delay);
        let mut session = EditSession::new(document);
        let mut applied = 0;

        for (index, mutation) in mutations.into_iter().enumerate() {
            let label = mutation.label();
            match session.apply(mutation) {
                Ok(_) => {
                    applied += 1;
                    let document = session.document();
                    autosaver.schedule(&args.id, &document.name, document.clone())?;
                }
                Err(e) => {
                    tracing::debug!(index, mutation = label, error = %e, "script entry skipped");
                    println!(
                        "  {} #{} {} skipped: {}",
                        "⚠️".yellow(),
                        index + 1,
                        label,
                        e.to_string().yellow()
                    );
                }
            }
        }

        println!(
            "{} Applied {} mutations (version {})",
            "✓".green(),
            applied,
            session.version()
        );

        let status = autosaver.shutdown().await?;
        tracing::info!(project = %args.id, applied, version = session.version(), "mutation script applied");
        Ok::<SaveStatus, anyhow::Error>(status)
    })?;

    match &status {
        SaveStatus::Failed(reason) => Err(anyhow!("{}: {}", status, reason)),
        SaveStatus::Saved => {
            println!("{} {}", "✓".green(), status);
            Ok(())
        }
        _ => Ok(()),
    }
}
