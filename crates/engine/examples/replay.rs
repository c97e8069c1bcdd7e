//! Replays a short typing session against the sample directory.
//!
//! Usage:
//!   cargo run -p mentions-engine --example replay -- [text-to-type] [--config <path>]
//!
//! Examples:
//!   # Type "hi @user2" one character at a time and confirm the first candidate
//!   RUST_LOG=debug cargo run -p mentions-engine --example replay -- "hi @user2"

use std::{env, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use mentions_engine::{MentionSession, OffsetSpace, StaticDirectoryProvider, load_config, load_config_from_path};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let mut script = String::from("hi @user2");
    let mut config_path: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        if arg == "--config" {
            config_path = Some(args.next().context("--config expects a path")?.into());
        } else {
            script = arg;
        }
    }

    let mut config = match &config_path {
        Some(path) => load_config_from_path(path)?,
        None => load_config()?,
    };
    // offsets below are byte lengths of the typed text
    config.offset_space = OffsetSpace::Utf8;
    let mut session = MentionSession::new(&config, Arc::new(StaticDirectoryProvider::sample().case_insensitive(true)));

    let mut typed = String::new();
    for character in script.chars() {
        typed.push(character);
        session.text_changed(typed.clone(), typed.len())?;
        while session.next_completion().await.is_some() {}
        info!(text = %typed, state = ?session.search_state(), "typed");
    }

    let candidate = session.search_state().results().and_then(|results| results.first().cloned());
    let Some(candidate) = candidate else {
        println!("no candidates for '{typed}'");
        return Ok(());
    };

    let outcome = session.select(&candidate)?;
    println!("text:     {}", outcome.text);
    println!("cursor:   {}", outcome.cursor);
    for run in session.editor().styled_runs()? {
        let slice = &session.editor().text()[run.start..run.start + run.length];
        println!("run:      {slice:?} {:?}", run.kind);
    }
    println!("postable: {}", session.editor().postable_text()?);
    Ok(())
}

fn init_tracing() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
