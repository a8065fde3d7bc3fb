/// Hostname or literal address, passed to the probe untouched.
pub type Host = String;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ProbeStatus {
    Reachable,
    Unreachable,
}

impl ProbeStatus {
    /// Exit code `0` is the only reachable outcome.
    pub fn from_exit_code(exit_code: Option<i32>) -> Self {
        match exit_code {
            Some(0) => ProbeStatus::Reachable,
            _ => ProbeStatus::Unreachable,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ProbeOutcome {
    pub host: Host,
    pub status: ProbeStatus,
    pub exit_code: Option<i32>,
}

impl ProbeOutcome {
    pub fn new(host: Host, exit_code: Option<i32>) -> Self {
        Self {
            host,
            status: ProbeStatus::from_exit_code(exit_code),
            exit_code,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.status == ProbeStatus::Reachable
    }
}
