//! Script executor
//!
//! Runs an operator-authored script body:
//! - materialized as a transient, uniquely named file
//! - executed through a shell with extra environment variables
//! - optional wall-clock timeout
//! - the file is removed on every exit path
//!
//! Only success or failure is observed; output goes to the gateway's own
//! stdout/stderr.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, warn};

/// Script execution errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Could not create or write the transient script
    #[error("Failed to create the script file: {0}")]
    TempFile(#[source] io::Error),
    /// The interpreter could not be started
    #[error("Failed to spawn {shell:?}: {source}")]
    SpawnFailed {
        shell: String,
        #[source]
        source: io::Error,
    },
    /// Waiting for the child failed
    #[error("Failed to wait for the script: {0}")]
    WaitFailed(#[source] io::Error),
    /// The script ran and exited unsuccessfully
    #[error("Script exited with {0}")]
    NonZeroExit(ExitStatus),
    /// The script was killed after exceeding its time limit
    #[error("Script timed out after {0:?}")]
    Timeout(Duration),
    /// The task running the script panicked or was aborted
    #[error("Script task aborted: {0}")]
    Aborted(#[source] tokio::task::JoinError),
}

/// Executable script file that exists for one invocation only
///
/// The name is random and created exclusively, so concurrent requests never
/// share a path. Dropping the value deletes the file.
pub struct TransientScript {
    path: Option<tempfile::TempPath>,
}

impl TransientScript {
    /// Write `body` verbatim into a new executable file inside `dir`
    /// (the system temp dir when `None`)
    pub fn create(body: &str, dir: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("voiceops-").suffix(".sh").rand_bytes(16);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(body.as_bytes())?;
        file.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o700))?;
        }

        // Closes the handle; the path still owns the file
        Ok(Self {
            path: Some(file.into_temp_path()),
        })
    }

    pub fn path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for TransientScript {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            if let Err(e) = path.close() {
                warn!(path = %shown, error = %e, "Failed to remove transient script");
            }
        }
    }
}

/// Script executor
#[derive(Clone, Debug)]
pub struct CommandRunner {
    shell: String,
    script_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            script_dir: None,
            timeout: None,
        }
    }

    /// Create transient scripts in `dir` instead of the system temp dir
    pub fn with_script_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.script_dir = dir;
        self
    }

    /// Kill scripts that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a script body and wait for it to finish
    ///
    /// # Arguments
    /// * `body` - script text, written to disk unchanged
    /// * `env` - added on top of the inherited environment, applied in
    ///   order; for a repeated key the last entry wins
    /// * `work_dir` - current directory of the script
    ///
    /// The run happens on its own task, so dropping the returned future
    /// (e.g. the HTTP client went away) does not stop the script; the task
    /// still waits for it and removes the transient file.
    pub async fn run_script(
        &self,
        body: &str,
        env: &[(String, String)],
        work_dir: Option<&Path>,
    ) -> Result<(), CommandError> {
        let runner = self.clone();
        let body = body.to_string();
        let env = env.to_vec();
        let work_dir = work_dir.map(Path::to_path_buf);

        tokio::spawn(async move { runner.execute(&body, &env, work_dir.as_deref()).await })
            .await
            .map_err(|e| {
                error!(error = %e, "Script task aborted");
                CommandError::Aborted(e)
            })?
    }

    async fn execute(
        &self,
        body: &str,
        env: &[(String, String)],
        work_dir: Option<&Path>,
    ) -> Result<(), CommandError> {
        // Lives until this function returns, on every path
        let script = TransientScript::create(body, self.script_dir.as_deref())
            .map_err(CommandError::TempFile)?;

        debug!(script = %script.path().display(), shell = %self.shell, "Running script");

        let mut command = Command::new(&self.shell);
        command
            .arg(script.path())
            .stdin(Stdio::null());

        for (key, value) in env {
            command.env(key, value);
        }

        if let Some(dir) = work_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| {
            error!(shell = %self.shell, error = %source, "Failed to spawn process");
            CommandError::SpawnFailed {
                shell: self.shell.clone(),
                source,
            }
        })?;

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status.map_err(CommandError::WaitFailed)?,
                Err(_) => {
                    error!(timeout = ?limit, "Script timed out");
                    if let Err(e) = child.kill().await {
                        warn!(error = %e, "Failed to kill child process");
                    }
                    return Err(CommandError::Timeout(limit));
                }
            },
            None => child.wait().await.map_err(CommandError::WaitFailed)?,
        };

        if !status.success() {
            return Err(CommandError::NonZeroExit(status));
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn is_empty_dir(dir: &Path) -> bool {
        fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_run_script_success() {
        let scripts = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new("sh").with_script_dir(Some(scripts.path().to_path_buf()));

        let result = runner.run_script("exit 0", &[], None).await;

        assert!(result.is_ok());
        assert!(is_empty_dir(scripts.path()));
    }

    #[tokio::test]
    async fn test_run_script_non_zero_exit() {
        let scripts = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new("sh").with_script_dir(Some(scripts.path().to_path_buf()));

        let result = runner.run_script("exit 3", &[], None).await;

        match result {
            Err(CommandError::NonZeroExit(status)) => assert_eq!(status.code(), Some(3)),
            other => panic!("expected NonZeroExit, got {:?}", other),
        }
        assert!(is_empty_dir(scripts.path()));
    }

    #[tokio::test]
    async fn test_run_script_shell_not_found() {
        let scripts = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new("nonexistent_shell_12345")
            .with_script_dir(Some(scripts.path().to_path_buf()));

        let result = runner.run_script("exit 0", &[], None).await;

        assert!(matches!(result, Err(CommandError::SpawnFailed { .. })));
        assert!(is_empty_dir(scripts.path()));
    }

    #[tokio::test]
    async fn test_run_script_timeout_kills_and_cleans_up() {
        let scripts = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new("sh")
            .with_script_dir(Some(scripts.path().to_path_buf()))
            .with_timeout(Some(Duration::from_millis(200)));

        let result = runner.run_script("sleep 5", &[], None).await;

        assert!(matches!(result, Err(CommandError::Timeout(_))));
        assert!(is_empty_dir(scripts.path()));
    }

    #[tokio::test]
    async fn test_script_file_removed_after_run() {
        let out = tempfile::tempdir().unwrap();
        let record = out.path().join("script_path");
        let runner = CommandRunner::new("sh");

        // $0 is the transient script's own path
        let result = runner
            .run_script(
                r#"printf '%s' "$0" > "$OUT"; exit 1"#,
                &env(&[("OUT", record.to_str().unwrap())]),
                None,
            )
            .await;

        assert!(matches!(result, Err(CommandError::NonZeroExit(_))));
        let script_path = fs::read_to_string(&record).unwrap();
        assert!(script_path.contains("voiceops-"));
        assert!(!Path::new(&script_path).exists());
    }

    #[tokio::test]
    async fn test_later_env_entries_override_earlier() {
        let out = tempfile::tempdir().unwrap();
        let record = out.path().join("env");
        let runner = CommandRunner::new("sh");

        let result = runner
            .run_script(
                r#"printf '%s %s' "$A" "$B" > "$OUT""#,
                &env(&[
                    ("OUT", record.to_str().unwrap()),
                    ("A", "1"),
                    ("A", "2"),
                    ("B", "3"),
                ]),
                None,
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&record).unwrap(), "2 3");
    }

    #[tokio::test]
    async fn test_env_overrides_inherited_variable() {
        let out = tempfile::tempdir().unwrap();
        let record = out.path().join("home");
        let runner = CommandRunner::new("sh");

        runner
            .run_script(
                r#"printf '%s' "$HOME" > "$OUT""#,
                &env(&[("OUT", record.to_str().unwrap()), ("HOME", "/overridden")]),
                None,
            )
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&record).unwrap(), "/overridden");
    }

    #[tokio::test]
    async fn test_run_script_in_work_dir() {
        let work = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new("sh");

        runner
            .run_script("touch marker", &[], Some(work.path()))
            .await
            .unwrap();

        assert!(work.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_dropped_caller_does_not_cancel_script() {
        let scripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let marker = out.path().join("deployed");
        let runner = CommandRunner::new("sh").with_script_dir(Some(scripts.path().to_path_buf()));

        // Caller gives up long before the script is done
        let early = tokio::time::timeout(
            Duration::from_millis(300),
            runner.run_script(
                r#"sleep 1; touch "$OUT""#,
                &env(&[("OUT", marker.to_str().unwrap())]),
                None,
            ),
        )
        .await;
        assert!(early.is_err());
        assert!(!marker.exists());

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(marker.exists());
        assert!(is_empty_dir(scripts.path()));
    }

    #[test]
    fn test_transient_script_is_executable_and_removed_on_drop() {
        use std::os::unix::fs::PermissionsExt;

        let script = TransientScript::create("echo hello", None).unwrap();
        let path = script.path().to_path_buf();

        assert_eq!(fs::read_to_string(&path).unwrap(), "echo hello");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_ne!(mode & 0o100, 0);

        drop(script);
        assert!(!path.exists());
    }

    #[test]
    fn test_transient_script_names_are_unique() {
        let a = TransientScript::create("", None).unwrap();
        let b = TransientScript::create("", None).unwrap();

        assert_ne!(a.path(), b.path());
    }
}
