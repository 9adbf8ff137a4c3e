//! Service wiring.
//!
//! Builds the single logger, credential store, session monitor and client
//! shared by every command.

use std::path::PathBuf;
use std::sync::Arc;

use janitor_application::config::ENV_DATA_DIR;
use janitor_application::{
    AppConfig, ApiClient, ApplicationError, Authenticator, Clock, CredentialStore, KeyValueStore,
    Logger, SessionMonitor, Transport,
};
use janitor_domain::BuildMode;
use janitor_infrastructure::{
    FileKeyValueStore, HttpLogCollector, ReqwestTransport, SystemClock, TracingConsole,
    default_data_dir,
};

use crate::error::{CliError, CliResult};

pub struct AppContext<T> {
    pub client: ApiClient<T>,
    pub auth: Authenticator<T>,
    pub logger: Logger,
    pub session: SessionMonitor,
    pub mode: BuildMode,
}

impl AppContext<ReqwestTransport> {
    /// Wires the production adapters.
    pub fn from_config(config: &AppConfig) -> CliResult<Self> {
        let data_dir = config
            .data_dir
            .clone()
            .or_else(default_data_dir)
            .ok_or(CliError::NoDataDir(ENV_DATA_DIR))?;
        let store = FileKeyValueStore::open(&data_dir).map_err(ApplicationError::from)?;
        let transport = ReqwestTransport::new()?;
        Self::assemble(config, Arc::new(store), Arc::new(transport), Arc::new(SystemClock::new()))
    }

    /// Directory of the durable store, for status output.
    pub fn data_dir(config: &AppConfig) -> Option<PathBuf> {
        config.data_dir.clone().or_else(default_data_dir)
    }
}

impl<T: Transport> AppContext<T> {
    /// Wires the services over the given adapters.
    pub fn assemble(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> CliResult<Self> {
        let settings = config.logger_settings();
        let mut builder = Logger::builder(settings.clone(), clock)
            .store(Arc::clone(&store))
            .console(Arc::new(TracingConsole::new()));
        if let Some(endpoint) = &settings.collector_endpoint {
            let collector = HttpLogCollector::from_endpoint(endpoint).map_err(|source| {
                CliError::InvalidEndpoint {
                    endpoint: endpoint.clone(),
                    source,
                }
            })?;
            builder = builder.collector(Arc::new(collector));
        }
        let logger = builder.build();

        let session = SessionMonitor::default();
        let client = ApiClient::new(
            transport,
            CredentialStore::new(store),
            logger.clone(),
            session.clone(),
            config.client_config(),
        );

        Ok(Self {
            auth: Authenticator::new(client.clone()),
            client,
            logger,
            session,
            mode: config.mode,
        })
    }
}
