use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::speech::ProcessError;

/// Run an external program to completion without blocking the runtime.
///
/// `stdin` (if any) is fed on a separate task so a chatty child cannot deadlock
/// on a full stderr pipe. stdout is discarded, stderr is captured for error
/// reporting. The child is killed if the returned future is dropped.
pub async fn run(program: &str, args: &[String], stdin: Option<&str>) -> Result<(), ProcessError> {
    let start_time = std::time::Instant::now();

    let mut child = Command::new(program)
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let writer = match (stdin, child.stdin.take()) {
        (Some(text), Some(mut pipe)) => {
            let text = text.to_string();
            Some(tokio::spawn(async move {
                pipe.write_all(text.as_bytes()).await?;
                pipe.shutdown().await
            }))
        }
        _ => None,
    };

    let output = child
        .wait_with_output()
        .await
        .map_err(|source| ProcessError::Io {
            program: program.to_string(),
            source,
        })?;

    if let Some(writer) = writer {
        match writer.await {
            Ok(Ok(())) => {}
            // A child that exits early closes its stdin; the exit status tells the real story
            Ok(Err(e)) => tracing::debug!(program, error = %e, "stdin write failed"),
            Err(e) => tracing::warn!(program, error = %e, "stdin writer task failed"),
        }
    }

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    tracing::debug!(
        program,
        exit_code = ?output.status.code(),
        latency_ms = start_time.elapsed().as_millis(),
        "External process finished"
    );

    if !output.status.success() {
        return Err(ProcessError::Exited {
            program: program.to_string(),
            code: output.status.code(),
            stderr,
        });
    }

    Ok(())
}
