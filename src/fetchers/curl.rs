use super::MarkupFetcher;
use crate::error::ScrapeError;
use async_trait::async_trait;
use log::debug;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Downloads through an external `curl -s -L` process.
pub struct CurlFetcher {
    program: String,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("curl", timeout)
    }

    /// Use a different executable that accepts curl's `-s -L <url>` arguments.
    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MarkupFetcher for CurlFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("{} -s -L {}", self.program, url);
        let mut command = Command::new(&self.program);
        command.args(["-s", "-L", url]).kill_on_drop(true);

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| ScrapeError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs(),
            })??;

        if !output.status.success() {
            return Err(ScrapeError::ProcessExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn fetcher_name(&self) -> &str {
        "curl"
    }
}
