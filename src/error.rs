use thiserror::Error;

/// Errors raised by the schedule engine, the simulation lifecycle and its collaborators.
///
/// Payloads are kept as plain data so a failure can be retained by the lifecycle
/// and handed out to observers more than once.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Remote rejected the request: {status} {status_text}")]
    RemoteRejection { status: u16, status_text: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("A simulation is already being submitted")]
    SubmissionInFlight,
    #[error("Simulation was superseded before its response arrived")]
    Superseded,
    #[error("Risk score already attached to simulation {0}")]
    RiskScoreAlreadyAttached(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for SimulationError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<reqwest::Error> for SimulationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for SimulationError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
