use crate::config::LifecycleConfig;
use crate::domain::loan::SimulationRequest;
use crate::domain::ports::SimulationGatewayRef;
use crate::domain::simulation::{SimulationId, SimulationRecord};
use crate::error::{Result, SimulationError};
use log::{debug, error, info, warn};
use std::sync::{Arc, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::AbortHandle;

/// Observable phase of the current simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Submitting,
    Ready,
    FetchingRisk,
    Scored,
    Failed,
}

#[derive(Default)]
struct Session {
    /// Bumped on every submit and reset. Responses carrying an older epoch are stale.
    epoch: u64,
    record: Option<SimulationRecord>,
    failure: Option<SimulationError>,
    risk_scheduled: bool,
    risk_unavailable: bool,
}

impl Session {
    fn discard(&mut self) {
        self.record = None;
        self.failure = None;
        self.risk_scheduled = false;
        self.risk_unavailable = false;
        self.epoch += 1;
    }

    fn owns(&self, epoch: u64, simulation_id: &SimulationId) -> bool {
        self.epoch == epoch
            && self
                .record
                .as_ref()
                .is_some_and(|record| record.simulation_id() == simulation_id)
    }
}

/// Background work spawned for the current simulation.
#[derive(Default)]
struct PendingTasks {
    submission: Option<AbortHandle>,
    risk_fetch: Option<AbortHandle>,
}

struct Shared {
    session: Mutex<Session>,
    state: watch::Sender<LifecycleState>,
    /// Kept outside `session` so tasks can be aborted without awaiting the lock.
    tasks: std::sync::Mutex<PendingTasks>,
}

impl Shared {
    fn transition(&self, next: LifecycleState) {
        let previous = self.state.send_replace(next);
        debug!("Simulation lifecycle: {:?} -> {:?}", previous, next);
    }

    fn current(&self) -> LifecycleState {
        *self.state.borrow()
    }

    fn pending(&self) -> MutexGuard<'_, PendingTasks> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn abort_pending(&self) {
        let mut pending = self.pending();
        for handle in [pending.submission.take(), pending.risk_fetch.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }
}

/// Drives one simulation at a time through submission, display and risk scoring.
///
/// The lifecycle is the sole owner of the current [`SimulationRecord`]. Callers
/// observe it through snapshots ([`record`](Self::record)) or by subscribing to
/// state changes.
pub struct SimulationLifecycle {
    gateway: SimulationGatewayRef,
    config: LifecycleConfig,
    shared: Arc<Shared>,
}

impl SimulationLifecycle {
    pub fn new(gateway: SimulationGatewayRef, config: LifecycleConfig) -> Self {
        let (state, _) = watch::channel(LifecycleState::Idle);
        Self {
            gateway,
            config,
            shared: Arc::new(Shared {
                session: Mutex::new(Session::default()),
                state,
                tasks: std::sync::Mutex::new(PendingTasks::default()),
            }),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.shared.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.shared.state.subscribe()
    }

    pub async fn record(&self) -> Option<SimulationRecord> {
        self.shared.session.lock().await.record.clone()
    }

    /// Failure that put the lifecycle into `Failed`, if any.
    pub async fn last_error(&self) -> Option<SimulationError> {
        self.shared.session.lock().await.failure.clone()
    }

    /// Submits a new simulation, replacing whatever record was live.
    ///
    /// Rejected with `SubmissionInFlight` while another submission is outstanding.
    /// Returns `Superseded` if the lifecycle was reset before the collaborator answered.
    ///
    /// The collaborator call runs in its own task, so dropping the returned future
    /// does not leave the lifecycle stuck in `Submitting`: the answer is still
    /// applied when it arrives.
    pub async fn submit(&self, request: SimulationRequest) -> Result<SimulationRecord> {
        request.validate()?;

        let (task, epoch) = {
            let mut session = self.shared.session.lock().await;
            if self.shared.current() == LifecycleState::Submitting {
                warn!("Submission rejected: a simulation is already in flight");
                return Err(SimulationError::SubmissionInFlight);
            }
            session.discard();
            self.shared.abort_pending();
            self.shared.transition(LifecycleState::Submitting);

            let task = tokio::spawn(apply_submission(
                Arc::clone(&self.shared),
                Arc::clone(&self.gateway),
                request,
                session.epoch,
                self.config.risk_fetch_delay,
            ));
            self.shared.pending().submission = Some(task.abort_handle());
            (task, session.epoch)
        };

        match task.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => Err(SimulationError::Superseded),
            Err(err) => {
                let failure = SimulationError::Transport(format!("Submission task failed: {}", err));
                let mut session = self.shared.session.lock().await;
                if session.epoch == epoch && self.shared.current() == LifecycleState::Submitting {
                    session.failure = Some(failure.clone());
                    self.shared.transition(LifecycleState::Failed);
                }
                Err(failure)
            }
        }
    }

    /// Returns to `Idle`, dropping the record and any pending collaborator call.
    pub async fn reset(&self) {
        let mut session = self.shared.session.lock().await;
        session.discard();
        self.shared.abort_pending();
        self.shared.transition(LifecycleState::Idle);
    }

    /// Waits until the risk outcome of the current record is known.
    ///
    /// Resolves to the score once attached, or `None` if the fetch failed or there
    /// is no record to score.
    pub async fn await_risk_score(&self) -> Option<String> {
        let mut changes = self.subscribe();
        loop {
            {
                let session = self.shared.session.lock().await;
                match self.shared.current() {
                    LifecycleState::Scored => {
                        return session
                            .record
                            .as_ref()
                            .and_then(|record| record.risk_score())
                            .map(str::to_owned);
                    }
                    LifecycleState::Idle | LifecycleState::Failed => return None,
                    LifecycleState::Ready if session.risk_unavailable => return None,
                    _ => {}
                }
            }
            if changes.changed().await.is_err() {
                return None;
            }
        }
    }
}

impl Drop for SimulationLifecycle {
    fn drop(&mut self) {
        self.shared.abort_pending();
    }
}

async fn apply_submission(
    shared: Arc<Shared>,
    gateway: SimulationGatewayRef,
    request: SimulationRequest,
    epoch: u64,
    risk_fetch_delay: Duration,
) -> Result<SimulationRecord> {
    let outcome = gateway.submit_simulation(&request).await;

    let mut session = shared.session.lock().await;
    if session.epoch != epoch {
        debug!("Discarding submission response after reset");
        return Err(SimulationError::Superseded);
    }
    shared.pending().submission = None;

    match outcome {
        Ok(submission) => {
            let record = SimulationRecord::new(request, submission);
            info!(
                "Simulation {} ready with {} scheduled payments",
                record.simulation_id(),
                record.schedule().len()
            );
            session.record = Some(record.clone());
            shared.transition(LifecycleState::Ready);
            schedule_risk_fetch(&shared, &gateway, &mut session, risk_fetch_delay);
            Ok(record)
        }
        Err(err) => {
            error!("Simulation submission failed: {}", err);
            session.failure = Some(err.clone());
            shared.transition(LifecycleState::Failed);
            Err(err)
        }
    }
}

fn schedule_risk_fetch(
    shared: &Arc<Shared>,
    gateway: &SimulationGatewayRef,
    session: &mut Session,
    delay: Duration,
) {
    if session.risk_scheduled {
        return;
    }
    let Some(record) = session.record.as_ref() else {
        return;
    };
    session.risk_scheduled = true;
    let task = tokio::spawn(fetch_risk_after_delay(
        Arc::clone(shared),
        Arc::clone(gateway),
        record.simulation_id().clone(),
        session.epoch,
        delay,
    ));
    shared.pending().risk_fetch = Some(task.abort_handle());
}

async fn fetch_risk_after_delay(
    shared: Arc<Shared>,
    gateway: SimulationGatewayRef,
    simulation_id: SimulationId,
    epoch: u64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;

    {
        let session = shared.session.lock().await;
        if !session.owns(epoch, &simulation_id) || shared.current() != LifecycleState::Ready {
            return;
        }
        shared.transition(LifecycleState::FetchingRisk);
    }

    let outcome = gateway.fetch_simulation_details(&simulation_id).await;

    let mut session = shared.session.lock().await;
    if !session.owns(epoch, &simulation_id) || shared.current() != LifecycleState::FetchingRisk {
        debug!("Discarding stale risk response for simulation {}", simulation_id);
        return;
    }
    shared.pending().risk_fetch = None;

    let attached = match outcome {
        Ok(details) => session
            .record
            .as_mut()
            .map(|record| record.attach_risk_score(details.risk_score)),
        Err(err) => Some(Err(err)),
    };

    match attached {
        Some(Ok(())) => {
            info!("Simulation {} scored", simulation_id);
            shared.transition(LifecycleState::Scored);
        }
        Some(Err(err)) => {
            warn!(
                "Risk score unavailable for simulation {}: {}",
                simulation_id, err
            );
            session.risk_unavailable = true;
            shared.transition(LifecycleState::Ready);
        }
        None => {}
    }
}
