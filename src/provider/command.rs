// Subprocess helper shared by the command-backed providers.

use std::io::ErrorKind;
use std::time::Duration;

use tokio::process::Command;

use crate::error::NoSignal;

/// Runs `program args..` and returns stdout (lossy UTF-8).
/// A missing binary maps to `NoAdapter`; timeouts and non-zero exits to `QueryFailed`.
pub(super) async fn run(program: &str, args: &[&str], timeout: Duration) -> Result<String, NoSignal> {
    let child = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
            return Err(NoSignal::NoAdapter(format!("`{program}` not found")));
        }
        Ok(Err(e)) => {
            return Err(NoSignal::QueryFailed(format!("failed to run `{program}`: {e}")));
        }
        Err(_) => {
            return Err(NoSignal::QueryFailed(format!(
                "`{program}` timed out after {} ms",
                timeout.as_millis()
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(NoSignal::QueryFailed(format!(
            "`{program} {}` exited with {}: {}",
            args.join(" "),
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Splits `"  Key   : value "` into `("Key", "value")` at the first colon.
pub(super) fn split_kv(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}
