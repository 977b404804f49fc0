//! Gherkin CLI subprocess client

use crate::core::Envelope;
use crate::error::CucumberError;
use crate::gherkin::{parse_ndjson, PickleSource};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Runs `<gherkin> <feature>` and decodes its stdout
#[derive(Debug, Clone)]
pub struct GherkinSubprocess {
    /// Resolved path to the gherkin executable
    executable: PathBuf,

    /// Timeout for one parse in seconds
    timeout_secs: u64,
}

impl GherkinSubprocess {
    /// Locate the executable and build a client.
    ///
    /// A name containing a path separator must point at an existing file;
    /// a bare name is looked up on `PATH`.
    pub fn resolve(executable: impl AsRef<Path>, timeout_secs: u64) -> Result<Self, CucumberError> {
        let executable = executable.as_ref();
        let resolved = locate(executable)
            .ok_or_else(|| CucumberError::PathResolutionFailure(executable.to_path_buf()))?;

        debug!("Using gherkin executable at {}", resolved.display());
        Ok(Self {
            executable: resolved,
            timeout_secs,
        })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

fn locate(executable: &Path) -> Option<PathBuf> {
    if executable.components().count() > 1 {
        return executable.is_file().then(|| executable.to_path_buf());
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        let candidate = dir.join(executable);
        if candidate.is_file() {
            return Some(candidate);
        }
        let ext = std::env::consts::EXE_EXTENSION;
        if ext.is_empty() {
            return None;
        }
        let candidate = candidate.with_extension(ext);
        candidate.is_file().then_some(candidate)
    })
}

#[async_trait]
impl PickleSource for GherkinSubprocess {
    async fn envelopes(&self, feature: &Path) -> Result<Vec<Envelope>, CucumberError> {
        debug!("Parsing {} with {}", feature.display(), self.executable.display());

        let result = timeout(
            Duration::from_secs(self.timeout_secs),
            Command::new(&self.executable)
                .arg(feature)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| CucumberError::ParserTimeout(self.timeout_secs))?;

        let output = result.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                CucumberError::PathResolutionFailure(self.executable.clone())
            }
            _ => CucumberError::Io(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            warn!("gherkin exited with code {}: {}", code, stderr);
            return Err(CucumberError::ParserProcess { code, stderr });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            CucumberError::ParseFailure(format!("gherkin output is not valid UTF-8: {}", e))
        })?;

        debug!("gherkin returned {} bytes of output", stdout.len());
        parse_ndjson(&stdout)
    }
}
