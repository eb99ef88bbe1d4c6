use super::*;
use crate::error::Error;
use serde_json::{json, Value};

fn python3_available() -> bool {
    std::process::Command::new(DEFAULT_INTERPRETER)
        .arg("--version")
        .output()
        .is_ok_and(|out| out.status.success())
}

fn params(value: Value) -> Parameters {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn test_render() {
    assert_eq!(render(&ScriptOutcome::default()), "Code executed successfully.");

    let outcome = ScriptOutcome {
        locals: vec![
            ("x".to_string(), "3".to_string()),
            ("name".to_string(), "'bob'".to_string()),
        ],
        printed: "hi\n".to_string(),
    };
    assert_eq!(
        render(&outcome),
        "Code executed successfully. Output: {x: 3, name: 'bob'}\nPrinted output:\nhi\n"
    );
}

#[tokio::test]
async fn test_locals_reported() {
    if !python3_available() {
        return;
    }

    let out = ScriptExecutor::new()
        .execute(params(json!({"code": "x = 1 + 2\ny = 'ok'"})))
        .await
        .unwrap();

    assert_eq!(out, "Code executed successfully. Output: {x: 3, y: 'ok'}");
}

#[tokio::test]
async fn test_no_locals() {
    if !python3_available() {
        return;
    }

    let out = ScriptExecutor::new()
        .execute(params(json!({"code": "print('hello')"})))
        .await
        .unwrap();

    assert_eq!(out, "Code executed successfully.\nPrinted output:\nhello\n");
}

#[tokio::test]
async fn test_exception_is_script_error() {
    if !python3_available() {
        return;
    }

    let err = ScriptExecutor::new()
        .execute(params(json!({"code": "1 / 0"})))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Script(_)));
    assert!(err.to_string().starts_with("Python execution error: ZeroDivisionError"));
}

#[tokio::test]
async fn test_fresh_scope_per_run() {
    if !python3_available() {
        return;
    }

    let exec = ScriptExecutor::new();
    exec.execute(params(json!({"code": "leftover = 1"})))
        .await
        .unwrap();

    let err = exec
        .execute(params(json!({"code": "y = leftover"})))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("NameError"));
}

#[tokio::test]
async fn test_timeout() {
    if !python3_available() {
        return;
    }

    let exec = ScriptExecutor::with_config(
        ScriptConfig::default().with_timeout(std::time::Duration::from_millis(300)),
    );
    let err = exec
        .execute(params(json!({"code": "import time\ntime.sleep(5)"})))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout(300)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_background_process_holding_stdout_is_bounded() {
    if !python3_available() {
        return;
    }

    let exec = ScriptExecutor::with_config(
        ScriptConfig::default().with_timeout(std::time::Duration::from_millis(500)),
    );
    let start = std::time::Instant::now();
    let err = exec
        .execute(params(json!({
            "code": "import subprocess\nsubprocess.Popen(['sleep', '5'])"
        })))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout(500)));
    assert!(start.elapsed() < std::time::Duration::from_secs(3));
}

#[tokio::test]
async fn test_missing_interpreter() {
    let exec = ScriptExecutor::with_config(
        ScriptConfig::default().with_interpreter("shellwright-no-such-python"),
    );
    let err = exec
        .execute(params(json!({"code": "x = 1"})))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Script(_)));
}
