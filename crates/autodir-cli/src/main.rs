use anyhow::Result;
use autodir_core::script::{load_script, replay};
use autodir_core::types::NodeId;
use autodir_core::DocumentHooks;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::Level;

/// Replay an event script through the text-direction engine and print every
/// direction change it produces.
#[derive(Parser)]
#[command(name = "autodir", version)]
struct Cli {
    /// Script file to replay
    script: PathBuf,

    /// Emit direction changes as JSON lines
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut script = load_script(&cli.script)?;
    let names: HashMap<NodeId, String> = script
        .names
        .iter()
        .map(|(name, id)| (*id, name.clone()))
        .collect();

    let hooks = DocumentHooks::default();
    let changes = replay(&mut script, &hooks);

    for change in &changes {
        if cli.json {
            println!("{}", serde_json::to_string(change)?);
        } else {
            let name = names
                .get(&change.target)
                .map(String::as_str)
                .unwrap_or("<unnamed>");
            let source = if change.manual { "manual" } else { "auto" };
            println!("{name} -> {} ({source})", change.dir);
        }
    }
    if changes.is_empty() && !cli.json {
        println!("no direction changes");
    }
    Ok(())
}
