#![allow(dead_code)]

use async_trait::async_trait;
use credit_sim::application::amortization::compute_schedule_for;
use credit_sim::domain::loan::SimulationRequest;
use credit_sim::domain::ports::SimulationGateway;
use credit_sim::domain::simulation::{SimulationDetails, SimulationId, SimulationSubmission};
use credit_sim::error::{Result, SimulationError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Gateway whose answers and latencies are scripted by the test.
///
/// Submissions get ids `sim-1`, `sim-2`, ... and schedules from the local engine
/// unless a failure was queued. Details answer `risk-for-<id>` unless a failure was
/// registered for that id.
#[derive(Default)]
pub struct ScriptedGateway {
    submit_delay: Duration,
    fetch_delay: Duration,
    submit_failures: Mutex<VecDeque<SimulationError>>,
    fetch_failures: Mutex<HashMap<SimulationId, SimulationError>>,
    submit_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn fail_next_submit(&self, err: SimulationError) {
        self.submit_failures.lock().unwrap().push_back(err);
    }

    pub fn fail_fetch_for(&self, simulation_id: &str, err: SimulationError) {
        self.fetch_failures
            .lock()
            .unwrap()
            .insert(SimulationId::new(simulation_id), err);
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimulationGateway for ScriptedGateway {
    async fn submit_simulation(&self, request: &SimulationRequest) -> Result<SimulationSubmission> {
        let n = self.submit_calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.submit_delay).await;

        if let Some(err) = self.submit_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(SimulationSubmission {
            simulation_id: SimulationId::new(format!("sim-{n}")),
            schedule: compute_schedule_for(request)?,
        })
    }

    async fn fetch_simulation_details(
        &self,
        simulation_id: &SimulationId,
    ) -> Result<SimulationDetails> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.fetch_delay).await;

        if let Some(err) = self.fetch_failures.lock().unwrap().remove(simulation_id) {
            return Err(err);
        }
        Ok(SimulationDetails::new(format!("risk-for-{simulation_id}")))
    }
}

pub fn service_unavailable() -> SimulationError {
    SimulationError::RemoteRejection {
        status: 503,
        status_text: "Service Unavailable".to_string(),
    }
}
