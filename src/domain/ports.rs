use super::loan::SimulationRequest;
use super::simulation::{SimulationDetails, SimulationId, SimulationSubmission};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote collaborator that computes schedules and risk scores.
#[async_trait]
pub trait SimulationGateway: Send + Sync {
    async fn submit_simulation(&self, request: &SimulationRequest) -> Result<SimulationSubmission>;
    async fn fetch_simulation_details(&self, simulation_id: &SimulationId)
    -> Result<SimulationDetails>;
}

/// Key/value persistence for the last-entered form values.
#[async_trait]
pub trait FormStore: Send + Sync {
    async fn load(&self) -> Result<Option<SimulationRequest>>;
    async fn save(&self, request: &SimulationRequest) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Key under which the form values are stored.
pub const FORM_STORAGE_KEY: &str = "credit-simulation-form-data";

pub type SimulationGatewayRef = Arc<dyn SimulationGateway>;
pub type FormStoreBox = Box<dyn FormStore>;
