use clap::Parser;
use credit_sim::application::lifecycle::SimulationLifecycle;
use credit_sim::config::{DEFAULT_API_BASE_URL, GatewayConfig, LifecycleConfig};
use credit_sim::domain::loan::SimulationRequest;
use credit_sim::domain::ports::{FormStoreBox, SimulationGatewayRef};
use credit_sim::infrastructure::http::HttpSimulationGateway;
use credit_sim::infrastructure::in_memory::{InMemoryFormStore, LocalSimulationGateway};
use credit_sim::interfaces::csv::schedule_writer::ScheduleWriter;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Loan amortization simulator", long_about = None)]
struct Cli {
    /// Principal to borrow. Defaults to the last value entered.
    #[arg(long)]
    amount: Option<Decimal>,

    /// Annual interest rate in percent. Defaults to the last value entered.
    #[arg(long)]
    annual_rate: Option<Decimal>,

    /// Term in months. Defaults to the last value entered.
    #[arg(long)]
    months: Option<u32>,

    /// Base URL of the credit simulation service.
    #[arg(long, env = "CREDIT_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Compute locally instead of calling the service.
    #[arg(long)]
    offline: bool,

    /// Milliseconds to wait before fetching the risk score.
    #[arg(long)]
    risk_delay_ms: Option<u64>,

    /// Path to persistent form storage (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Forget remembered form values and start from the defaults.
    #[arg(long)]
    reset_form: bool,
}

impl Cli {
    fn apply_overrides(&self, mut request: SimulationRequest) -> SimulationRequest {
        if let Some(amount) = self.amount {
            request.amount = amount;
        }
        if let Some(annual_rate) = self.annual_rate {
            request.annual_rate = annual_rate;
        }
        if let Some(months) = self.months {
            request.months = months;
        }
        request
    }
}

fn open_form_store(db_path: Option<PathBuf>) -> Result<FormStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store =
                credit_sim::infrastructure::rocksdb::RocksDBFormStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            log::warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
            Ok(Box::new(InMemoryFormStore::new()))
        }
        None => Ok(Box::new(InMemoryFormStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let form_store = open_form_store(cli.db_path.clone())?;
    if cli.reset_form {
        form_store.clear().await.into_diagnostic()?;
    }
    let remembered = form_store
        .load()
        .await
        .into_diagnostic()?
        .unwrap_or_default();
    let request = cli.apply_overrides(remembered);
    request.validate().into_diagnostic()?;
    if request != remembered {
        form_store.save(&request).await.into_diagnostic()?;
    }

    let gateway: SimulationGatewayRef = if cli.offline {
        Arc::new(LocalSimulationGateway::new())
    } else {
        Arc::new(HttpSimulationGateway::new(GatewayConfig::new(cli.api_url.clone())).into_diagnostic()?)
    };

    let mut config = LifecycleConfig::default();
    if let Some(ms) = cli.risk_delay_ms {
        config = config.with_risk_fetch_delay(Duration::from_millis(ms));
    }
    let lifecycle = SimulationLifecycle::new(gateway, config);

    let record = lifecycle.submit(request).await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ScheduleWriter::new(stdout.lock());
    writer.write_schedule(record.schedule()).into_diagnostic()?;
    drop(writer);

    let risk_score = lifecycle
        .await_risk_score()
        .await
        .unwrap_or_else(|| "unavailable".to_string());
    let mut out = stdout.lock();
    writeln!(out, "risk_score,{}", risk_score).into_diagnostic()?;

    Ok(())
}
