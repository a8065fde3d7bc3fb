use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("{0} is not supported")]
    UnsupportedPlatform(String),
    #[error("probe timeout must be greater than zero")]
    InvalidTimeout,
    #[error("in-flight probe limit must be greater than zero")]
    InvalidConcurrencyLimit,
}
pub type Result<T> = std::result::Result<T, Error>;
