use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use log::{trace, warn};
use tokio::process::Command;

use crate::platform::Platform;

/// Performs a single reachability check against one host.
///
/// Implementations return the raw exit code of the check: `Some(0)` means the
/// host answered, any other value (including `None` when the check could not
/// run at all) means it did not. Implementations must honour `timeout` and
/// never block indefinitely.
#[async_trait]
pub trait ProbeInvoker: Send + Sync {
    async fn probe(&self, host: &str, timeout: Duration) -> Option<i32>;
}

/// Probes hosts by running the platform's `ping` tool.
///
/// Output of the tool is discarded, only its exit status is observed.
///
/// The host is passed as a single argument without a shell, but it is not
/// escaped: a host starting with `-` is read by `ping` as an option. No `--`
/// separator is added since Solaris `ping` does not accept one; such hosts
/// are logged at `warn`.
///
/// # Example
/// ```no_run
/// use fastping::{CommandInvoker, Platform, ProbeInvoker};
/// use std::time::Duration;
///
/// let invoker = CommandInvoker::new(Platform::Linux);
/// tokio_test::block_on(async {
///     let code = invoker.probe("192.168.1.1", Duration::from_secs(2)).await;
///     println!("ping exited with {:?}", code);
/// })
/// ```
#[derive(Clone, Debug)]
pub struct CommandInvoker {
    platform: Platform,
    program: PathBuf,
}

impl CommandInvoker {
    pub fn new(platform: Platform) -> Self {
        let program = match platform {
            Platform::Linux => "/bin/ping",
            Platform::Solaris => "/usr/sbin/ping",
            Platform::MacOsX => "/sbin/ping",
        };
        Self {
            platform,
            program: program.into(),
        }
    }

    /// Replaces the path of the `ping` tool. The argument dialect still
    /// follows the platform.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the tool for one probe.
    pub fn args(&self, host: &str, timeout: Duration) -> Vec<String> {
        let secs = timeout_secs(timeout).to_string();
        match self.platform {
            // iputils ping cannot stop on the first reply, so bound the total wait
            Platform::Linux => vec!["-w".into(), secs, host.into()],
            Platform::Solaris => vec![host.into(), secs],
            Platform::MacOsX => vec!["-o".into(), "-t".into(), secs, host.into()],
        }
    }
}

#[async_trait]
impl ProbeInvoker for CommandInvoker {
    async fn probe(&self, host: &str, timeout: Duration) -> Option<i32> {
        if looks_like_option(host) {
            warn!("host {} starts with '-' and will be read as a ping option", host);
        }
        let args = self.args(host, timeout);
        trace!("running {} {}", self.program.display(), args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;
        match status {
            Ok(status) => status.code(),
            Err(err) => {
                warn!(
                    "failed to run {} for {}, reason: {}",
                    self.program.display(),
                    host,
                    err
                );
                None
            }
        }
    }
}

pub(crate) fn looks_like_option(host: &str) -> bool {
    host.starts_with('-')
}

/// Whole seconds handed to the tool, rounded up and never zero.
pub(crate) fn timeout_secs(timeout: Duration) -> u64 {
    let secs = timeout
        .as_secs()
        .saturating_add(u64::from(timeout.subsec_nanos() > 0));
    secs.max(1)
}
