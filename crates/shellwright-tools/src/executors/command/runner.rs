use super::CommandSpec;
use crate::error::{Error, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

fn build(spec: &CommandSpec) -> Command {
    match spec {
        CommandSpec::Shell(line) => {
            let mut c = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C");
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c");
                c
            };
            c.arg(line);
            c
        }
        CommandSpec::Argv(argv) => {
            // Non-empty by construction in `CommandSpec::from_value`
            let (program, args) = argv.split_first().map_or(("", &[][..]), |(p, a)| (p.as_str(), a));
            let mut c = Command::new(program);
            c.args(args);
            c
        }
    }
}

/// Run to completion and return stdout and stderr as one stream
///
/// Both descriptors share a single pipe, so the text keeps the order the
/// command wrote it in. A non-zero exit becomes `Error::Command` carrying the
/// same text.
pub(crate) async fn run_captured(spec: &CommandSpec, timeout: Duration) -> Result<String> {
    let (reader, writer) = std::io::pipe()?;

    let mut cmd = build(spec);
    cmd.stdin(Stdio::null());
    cmd.stdout(writer.try_clone()?);
    cmd.stderr(writer);
    cmd.kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .map_err(|e| Error::Command(format!("could not start '{spec}': {e}")))?;
    // The write ends held by `cmd` must close or the reader never sees EOF
    drop(cmd);

    let run = async {
        let (output, status) = tokio::join!(read_to_end(reader), child.wait());
        Ok::<_, std::io::Error>((output?, status?))
    };
    let (output, status) = tokio::time::timeout(timeout, run)
        .await
        .map_err(|_| {
            warn!(command = %spec, timeout_ms = timeout.as_millis() as u64, "Command timed out");
            Error::Timeout(timeout.as_millis() as u64)
        })?
        .map_err(|e| Error::Command(e.to_string()))?;

    let combined = String::from_utf8_lossy(&output).into_owned();

    if status.success() {
        Ok(combined)
    } else {
        debug!(command = %spec, status = %status, "Command exited non-zero");
        if combined.trim().is_empty() {
            Err(Error::Command(format!("exited with {status}")))
        } else {
            Err(Error::Command(combined))
        }
    }
}

#[cfg(unix)]
async fn read_to_end(reader: std::io::PipeReader) -> std::io::Result<Vec<u8>> {
    use tokio::io::AsyncReadExt;

    let mut receiver =
        tokio::net::unix::pipe::Receiver::from_owned_fd(std::os::fd::OwnedFd::from(reader))?;
    let mut buffer = Vec::new();
    receiver.read_to_end(&mut buffer).await?;
    Ok(buffer)
}

#[cfg(not(unix))]
async fn read_to_end(mut reader: std::io::PipeReader) -> std::io::Result<Vec<u8>> {
    use std::io::Read;

    tokio::task::spawn_blocking(move || {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).map(|_| buffer)
    })
    .await
    .map_err(std::io::Error::other)?
}

/// Start without waiting; output goes straight to the user's terminal
pub(crate) fn spawn_detached(spec: &CommandSpec) -> Result<()> {
    let mut cmd = build(spec);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    let mut child = cmd
        .spawn()
        .map_err(|e| Error::Command(format!("could not start '{spec}': {e}")))?;

    let label = spec.to_string();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if status.success() => debug!(command = %label, "Detached command finished"),
            Ok(status) => warn!(command = %label, status = %status, "Detached command exited non-zero"),
            Err(e) => warn!(command = %label, error = %e, "Failed waiting for detached command"),
        }
    });

    Ok(())
}
