use std::{sync::Arc, time::Duration};

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, error, warn};
use tokio::sync::Semaphore;

use crate::{
    error::{Error, Result},
    invoker::{CommandInvoker, ProbeInvoker},
    platform::Platform,
    probe::{Host, ProbeOutcome},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Order of hosts within each list of a [`Classification`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ResultOrder {
    /// Hosts appear in the order their probes finished.
    #[default]
    Completion,
    /// Hosts appear in the order they were given.
    Input,
}

#[derive(Debug, Clone)]
pub struct ProberConfig {
    pub timeout: Duration,
    pub max_in_flight: Option<usize>,
    pub order: ResultOrder,
    pub hard_deadline: Option<Duration>,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_in_flight: None,
            order: ResultOrder::Completion,
            hard_deadline: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProberConfigBuilder {
    config: ProberConfig,
}

impl ProberConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeout handed to every probe of a round.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Caps how many probes run at the same time. Every host still gets its
    /// own task up front; tasks over the cap wait for a free slot.
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.config.max_in_flight = Some(limit);
        self
    }

    pub fn with_order(mut self, order: ResultOrder) -> Self {
        self.config.order = order;
        self
    }

    /// Stops waiting for a probe `grace` after its timeout and counts the host
    /// as unreachable. Without it a tool that ignores its own timeout stalls
    /// the whole round.
    pub fn with_hard_deadline(mut self, grace: Duration) -> Self {
        self.config.hard_deadline = Some(grace);
        self
    }

    /// # Errors
    /// Returns [`Error::InvalidTimeout`] for a zero timeout and
    /// [`Error::InvalidConcurrencyLimit`] for an in-flight cap of zero.
    pub fn build(self) -> Result<ProberConfig> {
        if self.config.timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        if self.config.max_in_flight == Some(0) {
            return Err(Error::InvalidConcurrencyLimit);
        }
        Ok(self.config)
    }
}

/// Hosts of one round split by probe result.
///
/// Every probed host lands in exactly one of the two lists.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Classification {
    pub good: Vec<Host>,
    pub bad: Vec<Host>,
}

impl Classification {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ProbeOutcome>) -> Self {
        let (good, bad): (Vec<_>, Vec<_>) = outcomes
            .into_iter()
            .partition(|outcome| outcome.is_reachable());
        Self {
            good: good.into_iter().map(|outcome| outcome.host).collect(),
            bad: bad.into_iter().map(|outcome| outcome.host).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.good.len() + self.bad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.good.is_empty() && self.bad.is_empty()
    }
}

/// Probes many hosts in parallel with one shared invoker.
///
/// # Example
/// ```no_run
/// use fastping::{select_probe, Prober, ProberConfigBuilder};
/// use std::time::Duration;
///
/// let invoker = select_probe(std::env::consts::OS).expect("unsupported platform");
/// let config = ProberConfigBuilder::new()
///     .with_timeout(Duration::from_secs(2))
///     .build()
///     .unwrap();
/// tokio_test::block_on(async {
///     let prober = Prober::new(invoker, config);
///     let classification = prober.probe_all(&["192.168.1.1", "192.168.1.2"]).await;
///     println!("good: {:?}, bad: {:?}", classification.good, classification.bad);
/// })
/// ```
#[derive(Debug)]
pub struct Prober<I> {
    invoker: Arc<I>,
    config: ProberConfig,
}

impl<I: ProbeInvoker + 'static> Prober<I> {
    pub fn new(invoker: I, config: ProberConfig) -> Self {
        Self {
            invoker: Arc::new(invoker),
            config,
        }
    }

    pub fn config(&self) -> &ProberConfig {
        &self.config
    }

    /// Probes every host once and classifies them.
    ///
    /// Returns only after every probe has finished. A failed probe is an
    /// unreachable host, never an error.
    pub async fn probe_all<S: AsRef<str>>(&self, hosts: &[S]) -> Classification {
        Classification::from_outcomes(self.probe_outcomes(hosts).await)
    }

    /// Like [`Prober::probe_all`] but keeps the exit code of every probe.
    pub async fn probe_outcomes<S: AsRef<str>>(&self, hosts: &[S]) -> Vec<ProbeOutcome> {
        debug!(
            "probing {} hosts, timeout {:?}, in-flight limit {:?}",
            hosts.len(),
            self.config.timeout,
            self.config.max_in_flight
        );
        let limiter = self
            .config
            .max_in_flight
            .map(|limit| Arc::new(Semaphore::new(limit.min(Semaphore::MAX_PERMITS))));

        // all tasks are spawned here, before anything is awaited
        let mut pending: FuturesUnordered<_> = hosts
            .iter()
            .enumerate()
            .map(|(index, host)| {
                let host: Host = host.as_ref().to_owned();
                let handle = tokio::spawn(probe_one(
                    Arc::clone(&self.invoker),
                    host.clone(),
                    self.config.timeout,
                    self.config.hard_deadline,
                    limiter.clone(),
                ));
                async move { (index, host, handle.await) }
            })
            .collect();

        let mut outcomes = Vec::with_capacity(hosts.len());
        while let Some((index, host, joined)) = pending.next().await {
            let outcome = joined.unwrap_or_else(|err| {
                error!("probe task for {} failed, reason: {}", host, err);
                ProbeOutcome::new(host, None)
            });
            outcomes.push((index, outcome));
        }

        if self.config.order == ResultOrder::Input {
            outcomes.sort_unstable_by_key(|(index, _)| *index);
        }
        debug!("probed {} hosts", outcomes.len());
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

async fn probe_one<I: ProbeInvoker>(
    invoker: Arc<I>,
    host: Host,
    timeout: Duration,
    hard_deadline: Option<Duration>,
    limiter: Option<Arc<Semaphore>>,
) -> ProbeOutcome {
    let _permit = match limiter {
        Some(limiter) => limiter.acquire_owned().await.ok(),
        None => None,
    };
    let exit_code = match hard_deadline {
        Some(grace) => {
            let deadline = timeout.saturating_add(grace);
            match tokio::time::timeout(deadline, invoker.probe(&host, timeout)).await {
                Ok(exit_code) => exit_code,
                Err(_) => {
                    warn!("probe of {} did not finish within its deadline", host);
                    None
                }
            }
        }
        None => invoker.probe(&host, timeout).await,
    };
    let outcome = ProbeOutcome::new(host, exit_code);
    debug!(
        "{}: {:?} (exit code {:?})",
        outcome.host, outcome.status, outcome.exit_code
    );
    outcome
}

/// Probes `hosts` with the `ping` tool of the running system.
///
/// # Errors
/// Returns [`Error::UnsupportedPlatform`] before probing anything if the
/// running system has no known `ping` dialect.
pub async fn probe_all<S: AsRef<str>>(hosts: &[S], config: ProberConfig) -> Result<Classification> {
    probe_all_on(std::env::consts::OS, hosts, config).await
}

/// Probes `hosts` with the `ping` tool of the given operating system family.
///
/// # Errors
/// Returns [`Error::UnsupportedPlatform`] before probing anything if
/// `os_identifier` is not recognised.
pub async fn probe_all_on<S: AsRef<str>>(
    os_identifier: &str,
    hosts: &[S],
    config: ProberConfig,
) -> Result<Classification> {
    probe_all_with(os_identifier, CommandInvoker::new, hosts, config).await
}

/// Resolves the platform of `os_identifier`, builds the invoker for it with
/// `make_invoker` and probes `hosts`.
///
/// `make_invoker` is only called once the platform is known, so nothing is
/// probed for an unrecognised identifier.
///
/// # Errors
/// Returns [`Error::UnsupportedPlatform`] if `os_identifier` is not recognised.
pub async fn probe_all_with<I, F, S>(
    os_identifier: &str,
    make_invoker: F,
    hosts: &[S],
    config: ProberConfig,
) -> Result<Classification>
where
    I: ProbeInvoker + 'static,
    F: FnOnce(Platform) -> I,
    S: AsRef<str>,
{
    let platform = Platform::from_os_identifier(os_identifier)?;
    Ok(Prober::new(make_invoker(platform), config)
        .probe_all(hosts)
        .await)
}
