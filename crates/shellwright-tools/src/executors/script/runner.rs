use super::ScriptConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

/// Prefix of the line the host wrapper writes its report on
const REPORT_MARKER: &str = "\u{1e}SHELLWRIGHT_REPORT\u{1e}";

/// Host program run by the interpreter. Reads `{"code": ...}` from stdin,
/// runs it with fresh globals and locals, captures what it prints, and
/// reports on one marked line.
const HOST_WRAPPER: &str = r#"
import contextlib, io, json, sys
MARK = "\x1eSHELLWRIGHT_REPORT\x1e"
payload = json.loads(sys.stdin.read())
printed = io.StringIO()
scope_globals = {}
scope_locals = {}
try:
    with contextlib.redirect_stdout(printed):
        exec(payload["code"], scope_globals, scope_locals)
except BaseException as exc:
    report = {"ok": False, "error": f"{type(exc).__name__}: {exc}", "printed": printed.getvalue()}
else:
    names = [(k, repr(v)) for k, v in scope_locals.items() if not (k.startswith("__") and k.endswith("__"))]
    report = {"ok": True, "locals": names, "printed": printed.getvalue()}
sys.__stdout__.write("\n" + MARK + json.dumps(report) + "\n")
sys.__stdout__.flush()
"#;

/// What the host wrapper reported
#[derive(Debug, Deserialize)]
struct Report {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    locals: Vec<(String, String)>,
    #[serde(default)]
    printed: String,
}

/// Result of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ScriptOutcome {
    /// Local names and their reprs, in assignment order
    pub locals: Vec<(String, String)>,
    /// Text the script printed
    pub printed: String,
}

pub(crate) async fn run_script(config: &ScriptConfig, code: &str) -> Result<ScriptOutcome> {
    let payload = serde_json::json!({ "code": code }).to_string();

    let mut child = Command::new(&config.interpreter)
        .arg("-I")
        .arg("-c")
        .arg(HOST_WRAPPER)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::Script(format!("could not start {}: {e}", config.interpreter)))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Script("interpreter stdin is unavailable".to_string()))?;
    stdin
        .write_all(payload.as_bytes())
        .await
        .map_err(|e| Error::Script(format!("failed to send code to interpreter: {e}")))?;
    drop(stdin);

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::Script("interpreter stdout is unavailable".to_string()))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::Script("interpreter stderr is unavailable".to_string()))?;

    let stdout_task = tokio::spawn(async move {
        let mut buffer = Vec::new();
        stdout.read_to_end(&mut buffer).await.map(|_| buffer)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buffer = Vec::new();
        stderr.read_to_end(&mut buffer).await.map(|_| buffer)
    });

    // Readers count against the limit too: a background process started by
    // the script can hold the pipes open after the interpreter exits
    let finish = async {
        let status = child
            .wait()
            .await
            .map_err(|e| Error::Script(format!("failed waiting for interpreter: {e}")))?;
        let stdout_bytes = stdout_task
            .await
            .map_err(|e| Error::Script(format!("stdout reader failed: {e}")))?
            .map_err(|e| Error::Script(format!("failed reading interpreter stdout: {e}")))?;
        let stderr_bytes = stderr_task
            .await
            .map_err(|e| Error::Script(format!("stderr reader failed: {e}")))?
            .map_err(|e| Error::Script(format!("failed reading interpreter stderr: {e}")))?;
        Ok::<_, Error>((status, stdout_bytes, stderr_bytes))
    };

    let finished = tokio::time::timeout(config.timeout, finish).await;
    let (status, stdout_bytes, stderr_bytes) = match finished {
        Ok(result) => result?,
        Err(_) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
            warn!(timeout_ms = config.timeout.as_millis() as u64, "Script timed out");
            return Err(Error::Timeout(config.timeout.as_millis() as u64));
        }
    };

    let stdout = String::from_utf8_lossy(&stdout_bytes);
    let stderr = String::from_utf8_lossy(&stderr_bytes);
    debug!(status = %status, stdout_bytes = stdout.len(), stderr_bytes = stderr.len(), "Script finished");

    let report = stdout
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(REPORT_MARKER))
        .ok_or_else(|| {
            let detail = stderr.trim();
            if detail.is_empty() {
                Error::Script(format!("interpreter exited with {status} without a report"))
            } else {
                Error::Script(detail.to_string())
            }
        })?;

    let report: Report = serde_json::from_str(report)
        .map_err(|e| Error::Script(format!("unreadable interpreter report: {e}")))?;

    if report.ok {
        Ok(ScriptOutcome {
            locals: report.locals,
            printed: report.printed,
        })
    } else {
        Err(Error::Script(
            report.error.unwrap_or_else(|| "unknown failure".to_string()),
        ))
    }
}
