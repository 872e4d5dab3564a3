use crate::application::amortization::compute_schedule_for;
use crate::domain::loan::SimulationRequest;
use crate::domain::ports::{FORM_STORAGE_KEY, FormStore, SimulationGateway};
use crate::domain::schedule::Schedule;
use crate::domain::simulation::{SimulationDetails, SimulationId, SimulationSubmission};
use crate::error::{Result, SimulationError};
use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Form values kept in process memory under [`FORM_STORAGE_KEY`].
///
/// Values are stored serialized, the same way a browser key/value store holds them,
/// so unreadable entries are treated as absent.
#[derive(Default, Clone)]
pub struct InMemoryFormStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw value under the form key, bypassing serialization.
    pub async fn insert_raw(&self, value: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(FORM_STORAGE_KEY.to_string(), value.into());
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn load(&self) -> Result<Option<SimulationRequest>> {
        let entries = self.entries.read().await;
        let Some(raw) = entries.get(FORM_STORAGE_KEY) else {
            return Ok(None);
        };
        match serde_json::from_str(raw) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                warn!("Ignoring unreadable stored form data: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, request: &SimulationRequest) -> Result<()> {
        let raw = serde_json::to_string(request)
            .map_err(|e| SimulationError::Storage(format!("Serialization error: {}", e)))?;
        self.entries
            .write()
            .await
            .insert(FORM_STORAGE_KEY.to_string(), raw);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.remove(FORM_STORAGE_KEY);
        Ok(())
    }
}

/// Placeholder classification returned by [`LocalSimulationGateway`].
pub const UNRATED: &str = "unrated";

/// Offline stand-in for the remote collaborator.
///
/// Schedules come from the local engine. Risk scores are a fixed label chosen at
/// construction, not the output of any risk model.
#[derive(Clone)]
pub struct LocalSimulationGateway {
    risk_score: String,
    simulations: Arc<RwLock<HashMap<SimulationId, Schedule>>>,
}

impl Default for LocalSimulationGateway {
    fn default() -> Self {
        Self::with_risk_score(UNRATED)
    }
}

impl LocalSimulationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk_score(risk_score: impl Into<String>) -> Self {
        Self {
            risk_score: risk_score.into(),
            simulations: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SimulationGateway for LocalSimulationGateway {
    async fn submit_simulation(&self, request: &SimulationRequest) -> Result<SimulationSubmission> {
        let schedule = compute_schedule_for(request)?;
        let simulation_id = SimulationId::new(Uuid::new_v4().to_string());
        self.simulations
            .write()
            .await
            .insert(simulation_id.clone(), schedule.clone());
        Ok(SimulationSubmission {
            simulation_id,
            schedule,
        })
    }

    async fn fetch_simulation_details(
        &self,
        simulation_id: &SimulationId,
    ) -> Result<SimulationDetails> {
        let simulations = self.simulations.read().await;
        let schedule = simulations
            .get(simulation_id)
            .ok_or_else(|| SimulationError::RemoteRejection {
                status: 404,
                status_text: "Not Found".to_string(),
            })?;

        let mut details = SimulationDetails::new(self.risk_score.clone());
        details.metadata.insert(
            "simulation_id".to_string(),
            serde_json::Value::String(simulation_id.to_string()),
        );
        details.metadata.insert(
            "months".to_string(),
            serde_json::Value::from(schedule.len()),
        );
        Ok(details)
    }
}
