//! Interactive session
//!
//! Reads a line after "You: ", runs it as one turn and prints
//! "Assistant: ...". EOF or Ctrl-C at the prompt ends the session; Ctrl-C
//! while a turn is running cancels only that turn.

use crate::app::{self, AppConfig};
use anyhow::Context;
use shellwright_core::{CancellationToken, MachineInfo, UserFriendlyError};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let machine = MachineInfo::detect();
    println!(
        "OS: {}, Terminal: {}",
        machine.os,
        machine.terminal.as_deref().unwrap_or("unknown")
    );
    if machine.is_unsupported_windows() {
        println!("{}", app::WINDOWS_WARNING);
    }

    let orchestrator = match app::build_orchestrator(&config, &machine).await {
        Ok(orchestrator) => orchestrator,
        Err(e) => match e.downcast_ref::<shellwright_core::Error>() {
            Some(err) => {
                report(err);
                std::process::exit(1);
            }
            None => return Err(e),
        },
    };

    let mut conversation = orchestrator.new_conversation();
    debug!(session_id = %conversation.session_id(), model = orchestrator.model(), "Session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush().context("Failed to write prompt")?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read input")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let cancel = CancellationToken::new();
        let watcher = interrupt_watcher(cancel.clone());
        let outcome = orchestrator.run_turn(&mut conversation, input, &cancel).await;
        watcher.abort();

        match outcome {
            Ok(result) => println!("Assistant: {}", result.response),
            Err(e) => {
                report(&e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Cancel `token` on the next Ctrl-C
fn interrupt_watcher(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}

fn report(err: &shellwright_core::Error) {
    eprintln!("Error: {}", err.user_message());
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  {suggestion}");
    }
}
