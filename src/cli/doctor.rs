//! Backend and environment diagnostics

use crate::app::{self, AppConfig};
use shellwright_core::MachineInfo;
use std::process::Command;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    println!("Shellwright Doctor\n");

    let mut all_ok = true;

    check_machine();
    all_ok &= check_interpreter(&config.tools.script.interpreter);
    all_ok &= check_backend(&config).await;

    println!();
    if all_ok {
        println!("All checks passed. Ready to chat with {}.", config.llm.model);
    } else {
        println!("Some checks failed. Please fix the issues above.");
        std::process::exit(1);
    }

    Ok(())
}

fn check_machine() {
    let machine = MachineInfo::detect();
    println!(
        "Machine: {} / {} / {}",
        machine.os,
        machine.terminal.as_deref().unwrap_or("unknown terminal"),
        machine.distro.as_deref().unwrap_or("unknown distro")
    );
    if machine.is_unsupported_windows() {
        println!("  ! {}", app::WINDOWS_WARNING);
    }
}

fn check_interpreter(interpreter: &str) -> bool {
    print!("Checking {interpreter}... ");

    match Command::new(interpreter).arg("--version").output() {
        Ok(output) if output.status.success() => {
            // Python 2 printed its version to stderr
            let version = if output.stdout.is_empty() {
                String::from_utf8_lossy(&output.stderr).trim().to_string()
            } else {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            };
            println!("ok ({version})");
            true
        }
        _ => {
            println!("not found");
            println!("  The python capability will fail until {interpreter} is installed.");
            false
        }
    }
}

async fn check_backend(config: &AppConfig) -> bool {
    print!("Checking Ollama at {}... ", config.llm.base_url);

    let provider = match app::resolve_provider(config) {
        Ok(provider) => provider,
        Err(e) => {
            println!("failed: {e:#}");
            return false;
        }
    };

    let models = match provider.list_models().await {
        Ok(models) => {
            println!("reachable ({} models installed)", models.len());
            models
        }
        Err(e) => {
            println!("unreachable: {e}");
            println!("  Start Ollama with: ollama serve");
            return false;
        }
    };

    let model = config.llm.model.as_str();
    if !models.iter().any(|m| m == model || m.strip_suffix(":latest") == Some(model)) {
        println!("  ! {model} is not installed. Run: ollama pull {model}");
        return false;
    }

    match app::verify_model(provider.as_ref(), model).await {
        Ok(info) => {
            println!(
                "  {model}: family {}, capabilities {}",
                info.family.as_deref().unwrap_or("unknown"),
                info.capabilities
                    .map(|c| c.join(", "))
                    .unwrap_or_else(|| "not reported".to_string())
            );
            true
        }
        Err(e) => {
            println!("  ! {e}");
            false
        }
    }
}
