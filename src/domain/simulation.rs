use super::loan::SimulationRequest;
use super::schedule::Schedule;
use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned to a simulation by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(String);

impl SimulationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SimulationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Answer to a simulation submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSubmission {
    pub simulation_id: SimulationId,
    pub schedule: Schedule,
}

/// Answer to a details lookup. Fields other than the risk score are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDetails {
    pub risk_score: String,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl SimulationDetails {
    pub fn new(risk_score: impl Into<String>) -> Self {
        Self {
            risk_score: risk_score.into(),
            metadata: serde_json::Map::new(),
        }
    }
}

/// The live simulation owned by the lifecycle.
///
/// Only the risk score may change after creation, and only once.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    simulation_id: SimulationId,
    request: SimulationRequest,
    schedule: Schedule,
    risk_score: Option<String>,
}

impl SimulationRecord {
    pub fn new(request: SimulationRequest, submission: SimulationSubmission) -> Self {
        Self {
            simulation_id: submission.simulation_id,
            request,
            schedule: submission.schedule,
            risk_score: None,
        }
    }

    pub fn simulation_id(&self) -> &SimulationId {
        &self.simulation_id
    }

    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn risk_score(&self) -> Option<&str> {
        self.risk_score.as_deref()
    }

    pub fn attach_risk_score(&mut self, risk_score: String) -> Result<()> {
        if self.risk_score.is_some() {
            return Err(SimulationError::RiskScoreAlreadyAttached(
                self.simulation_id.to_string(),
            ));
        }
        self.risk_score = Some(risk_score);
        Ok(())
    }
}
