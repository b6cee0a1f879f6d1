//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::WorkflowService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, HttpClient, RealFileSystem, ReqwestHttpClient};
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// HTTP client abstraction
    pub http: Arc<dyn HttpClient>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// Fails if the API key is missing, before any client is built.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let api_key = settings.require_api_key()?.to_string();
        let http = ReqwestHttpClient::new(api_key)?;
        Ok(Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(http),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, http }
    }

    pub fn workflow_service(&self) -> WorkflowService {
        WorkflowService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.http),
            Arc::clone(&self.settings),
        )
    }
}
