//! Parallel ping of many hosts.
//!
//! Every host gets its own probe, all probes run at the same time, and the
//! round ends once the last one has finished. Hosts whose `ping` exited with
//! status `0` are reported as good, every other host as bad.
//!
//! ## Example
//! ```no_run
//! use fastping::{probe_all, ProberConfigBuilder};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> fastping::Result<()> {
//!     let config = ProberConfigBuilder::new()
//!         .with_timeout(Duration::from_secs(3))
//!         .build()?;
//!     let classification = probe_all(&["www.example.com", "192.168.0.1"], config).await?;
//!     println!("GOOD: {}", classification.good.join(" "));
//!     println!("BAD: {}", classification.bad.join(" "));
//!     Ok(())
//! }
//! ```
//! The `ping` dialect is picked from the running system; use
//! [`prober::probe_all_on`] or [`prober::Prober`] with a custom
//! [`invoker::ProbeInvoker`] to choose it explicitly.

pub mod error;
pub mod invoker;
pub mod platform;
pub mod probe;
pub mod prober;
pub mod report;
pub mod subnet;

pub use error::{Error, Result};
pub use invoker::{CommandInvoker, ProbeInvoker};
pub use platform::{select_probe, Platform};
pub use probe::{Host, ProbeOutcome, ProbeStatus};
pub use prober::{
    probe_all, probe_all_on, probe_all_with, Classification, Prober, ProberConfig,
    ProberConfigBuilder, ResultOrder,
};
