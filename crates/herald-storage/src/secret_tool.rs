use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use herald_core::store::{SecretStore, SecretStoreError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_HELPER: &str = "secret-tool";

/// Secret store backed by the external `secret-tool` helper (libsecret).
/// Encryption and persistence are delegated entirely to the OS secret
/// service; this backend spawns the helper and checks its exit status.
pub struct SecretToolStore {
    helper: PathBuf,
    label: String,
    service: String,
    account: String,
}

impl SecretToolStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        let account = account.into();
        Self {
            helper: PathBuf::from(DEFAULT_HELPER),
            label: account.clone(),
            service: service.into(),
            account,
        }
    }

    /// Human-readable label shown by secret-service UIs (e.g. Seahorse).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Override the helper binary; used by config and by tests, which point
    /// this at a stub executable.
    pub fn with_helper(mut self, helper: impl Into<PathBuf>) -> Self {
        self.helper = helper.into();
        self
    }

    fn command(&self) -> Command {
        Command::new(&self.helper)
    }

    fn spawn_error(&self, err: std::io::Error) -> SecretStoreError {
        if err.kind() == std::io::ErrorKind::NotFound {
            SecretStoreError::HelperMissing {
                helper: self.helper.display().to_string(),
            }
        } else {
            SecretStoreError::Storage {
                reason: format!("failed to spawn {}: {err}", self.helper.display()),
            }
        }
    }
}

#[async_trait]
impl SecretStore for SecretToolStore {
    fn name(&self) -> &'static str {
        "secret-tool"
    }

    async fn put(&self, blob: &str) -> Result<(), SecretStoreError> {
        debug!(service = %self.service, "storing credential blob via secret-tool");
        let mut child = self
            .command()
            .arg("store")
            .arg(format!("--label={}", self.label))
            .args(["service", &self.service, "username", &self.account])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.spawn_error(err))?;

        // The blob travels over stdin; it must never appear in argv.
        let mut stdin = child.stdin.take().ok_or_else(|| SecretStoreError::Storage {
            reason: "helper stdin unavailable".to_string(),
        })?;
        if let Err(err) = stdin.write_all(blob.as_bytes()).await {
            // A helper that bails before reading stdin breaks the pipe; its
            // exit status and stderr carry the real diagnostics.
            if err.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(SecretStoreError::Storage {
                    reason: format!("failed to write to helper stdin: {err}"),
                });
            }
        }
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|err| SecretStoreError::Storage {
                reason: format!("failed to wait for helper: {err}"),
            })?;

        if !output.status.success() {
            return Err(SecretStoreError::Storage {
                reason: exit_reason(&output),
            });
        }
        Ok(())
    }

    async fn get(&self) -> Result<String, SecretStoreError> {
        let output = self
            .command()
            .args(["lookup", "service", &self.service, "username", &self.account])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| self.spawn_error(err))?;

        if !output.status.success() {
            // lookup exits non-zero with no diagnostics when nothing matches
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.trim().is_empty() {
                return Err(SecretStoreError::NotFound);
            }
            return Err(SecretStoreError::Storage {
                reason: exit_reason(&output),
            });
        }

        let blob = String::from_utf8_lossy(&output.stdout).to_string();
        Ok(blob.strip_suffix('\n').unwrap_or(&blob).to_string())
    }

    async fn delete(&self) -> Result<(), SecretStoreError> {
        debug!(service = %self.service, "clearing credential blob via secret-tool");
        let output = self
            .command()
            .args(["clear", "service", &self.service, "username", &self.account])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| self.spawn_error(err))?;

        if !output.status.success() {
            // clearing an absent entry stays silent; anything with
            // diagnostics is a real failure
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                return Err(SecretStoreError::Storage {
                    reason: exit_reason(&output),
                });
            }
        }
        Ok(())
    }
}

fn exit_reason(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("helper exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}
