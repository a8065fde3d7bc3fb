use std::fmt;

use crate::error::{Error, Result};
use crate::invoker::CommandInvoker;

/// Operating system families with a known `ping` argument dialect.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Platform {
    Linux,
    Solaris,
    MacOsX,
}

impl Platform {
    /// Maps an operating system identifier to its platform family.
    ///
    /// Both the `uname` sysname spelling (`Linux`, `SunOS`, `Darwin`) and the
    /// [`std::env::consts::OS`] spelling (`linux`, `solaris`, `macos`) are
    /// accepted, case-insensitively.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedPlatform`] for any other identifier.
    pub fn from_os_identifier(os_identifier: &str) -> Result<Self> {
        match os_identifier.to_ascii_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "sunos" | "solaris" | "illumos" => Ok(Platform::Solaris),
            "darwin" | "macos" => Ok(Platform::MacOsX),
            _ => Err(Error::UnsupportedPlatform(os_identifier.into())),
        }
    }

    /// Platform family of the running system.
    pub fn current() -> Result<Self> {
        Self::from_os_identifier(std::env::consts::OS)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "Linux",
            Platform::Solaris => "SunOS",
            Platform::MacOsX => "Darwin",
        };
        f.write_str(name)
    }
}

/// Selects the probe invoker for the given operating system identifier.
///
/// # Errors
/// Returns [`Error::UnsupportedPlatform`] if the identifier is not recognised.
pub fn select_probe(os_identifier: &str) -> Result<CommandInvoker> {
    Platform::from_os_identifier(os_identifier).map(CommandInvoker::new)
}
