use crate::clients::OrderClient;
use crate::config::{ConfigError, LedgerConfig};
use crate::order_ledger;
use ledger_framework::StorageBackend;
use tokio::task::{JoinError, JoinHandle};
use tracing::info;

/// The runtime owner of the Order ledger.
///
/// `LedgerSystem` is responsible for:
/// - **Storage**: opening the configured backend and injecting it into the actor
/// - **Lifecycle Management**: starting and stopping the Order actor
///
/// # Example
///
/// ```ignore
/// let system = LedgerSystem::start(&LedgerConfig::from_env()?)?;
///
/// let active = system.order_client.list_active_orders().await?;
///
/// system.shutdown().await?;
/// ```
pub struct LedgerSystem {
    /// Client for interacting with the Order ledger
    pub order_client: OrderClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl LedgerSystem {
    /// Opens the configured backend and starts the ledger. Must be called inside a Tokio runtime.
    pub fn start(config: &LedgerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let backend = config.open_backend()?;
        info!(storage = ?config.storage, "Starting order ledger");
        Ok(Self::with_backend(config, backend))
    }

    /// Starts the ledger over an already opened backend.
    pub fn with_backend(config: &LedgerConfig, backend: impl StorageBackend) -> Self {
        let (actor, record_client) =
            order_ledger::new(backend, config.buffer_size, config.max_write_retries);
        let handle = tokio::spawn(actor.run());

        Self {
            order_client: OrderClient::new(record_client),
            handle,
        }
    }

    /// Drops the system's client and waits for the actor to finish.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Initiating graceful shutdown");
        drop(self.order_client);
        self.handle.await?;
        info!("Ledger stopped");
        Ok(())
    }
}
