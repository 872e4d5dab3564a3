use crate::config::GatewayConfig;
use crate::domain::loan::SimulationRequest;
use crate::domain::ports::SimulationGateway;
use crate::domain::simulation::{SimulationDetails, SimulationId, SimulationSubmission};
use crate::error::{Result, SimulationError};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, header};
use serde::de::DeserializeOwned;

/// REST client for the credit simulation service.
///
/// `POST /credit/simulate` submits a simulation, `GET /credit/simulate/{id}`
/// returns its details once scored.
#[derive(Clone)]
pub struct HttpSimulationGateway {
    client: Client,
    base_url: String,
}

impl HttpSimulationGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SimulationError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SimulationError::RemoteRejection {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl SimulationGateway for HttpSimulationGateway {
    async fn submit_simulation(&self, request: &SimulationRequest) -> Result<SimulationSubmission> {
        let url = format!("{}/credit/simulate", self.base_url);
        debug!("POST {}", url);
        self.send(self.client.post(&url).json(request)).await
    }

    async fn fetch_simulation_details(
        &self,
        simulation_id: &SimulationId,
    ) -> Result<SimulationDetails> {
        let url = format!("{}/credit/simulate/{}", self.base_url, simulation_id);
        debug!("GET {}", url);
        self.send(self.client.get(&url)).await
    }
}
