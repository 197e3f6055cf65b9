//! Application context - dependency injection container

use std::sync::Arc;

use procura_core::ports::{SentQuotesStore, SheetGateway};
use procura_core::ProcurementService;
use procura_domain::{Config, Result};
use procura_infra::{FileSentQuotesStore, SheetClient};

/// Application context - holds configuration and the wired service.
pub struct AppContext {
    pub config: Config,
    pub service: ProcurementService,
}

impl AppContext {
    /// Wire the production adapters: the scripting-endpoint client and the
    /// file-backed sent-quotes cache.
    pub fn new(config: Config) -> Result<Self> {
        let gateway: Arc<dyn SheetGateway> = Arc::new(SheetClient::new(config.sheets.clone())?);
        let sent_quotes: Arc<dyn SentQuotesStore> =
            Arc::new(FileSentQuotesStore::new(&config.cache.data_dir)?);
        let service = ProcurementService::new(gateway, sent_quotes);
        Ok(Self { config, service })
    }

    /// Build a context over pre-wired ports, for tests and tooling.
    pub fn with_ports(
        config: Config,
        gateway: Arc<dyn SheetGateway>,
        sent_quotes: Arc<dyn SentQuotesStore>,
    ) -> Self {
        let service = ProcurementService::new(gateway, sent_quotes);
        Self { config, service }
    }
}
