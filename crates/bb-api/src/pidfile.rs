//! Best-effort PID file for operational tooling.

use std::path::Path;

/// Write the process id to `path`, creating the parent directory.
/// Failures are logged and ignored; returns whether the file was written.
pub async fn write_pidfile(path: &Path) -> bool {
    if let Some(dir) = path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            tracing::debug!(path = %path.display(), error = %e, "pid file skipped");
            return false;
        }
    }
    match tokio::fs::write(path, std::process::id().to_string()).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "pid file written");
            true
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "pid file skipped");
            false
        }
    }
}
