//! Builds tool executors bound to a set of credentials.

use super::DriveToolExecutor;
use crate::config::FileConfig;
use crate::drive::{DriveApiClient, DriveEndpoints, build_http_client};
use gdrive_application::{
    Credentials, GatewayError, ToolExecutorFactory, ToolExecutorPort, ToolParams,
};
use std::sync::Arc;
use tracing::debug;

/// Factory sharing one HTTP connection pool between all executors.
///
/// The executor for the process-level credentials is built once and reused,
/// so its access token stays cached across requests. Invocations carrying
/// their own credentials get a fresh executor (and token) each time.
pub struct DriveToolExecutorFactory {
    http: reqwest::Client,
    endpoints: DriveEndpoints,
    credentials: Credentials,
    params: ToolParams,
    default: Arc<dyn ToolExecutorPort>,
}

impl DriveToolExecutorFactory {
    pub fn new(
        http: reqwest::Client,
        endpoints: DriveEndpoints,
        credentials: Credentials,
        params: ToolParams,
    ) -> Self {
        let default = build_executor(&http, &endpoints, credentials.clone(), &params);
        Self {
            http,
            endpoints,
            credentials,
            params,
            default,
        }
    }

    pub fn from_config(config: &FileConfig) -> Result<Self, GatewayError> {
        let http = build_http_client(config.drive.request_timeout())?;
        Ok(Self::new(
            http,
            config.drive.endpoints(),
            config.credentials.clone(),
            config.tool_params(),
        ))
    }
}

fn build_executor(
    http: &reqwest::Client,
    endpoints: &DriveEndpoints,
    credentials: Credentials,
    params: &ToolParams,
) -> Arc<dyn ToolExecutorPort> {
    let client = DriveApiClient::new(http.clone(), endpoints.clone(), credentials);
    Arc::new(DriveToolExecutor::new(Arc::new(client), params.clone()))
}

impl ToolExecutorFactory for DriveToolExecutorFactory {
    fn default_executor(&self) -> Arc<dyn ToolExecutorPort> {
        Arc::clone(&self.default)
    }

    fn executor_with(&self, overrides: &Credentials) -> Arc<dyn ToolExecutorPort> {
        let merged = self.credentials.merged_with(overrides);
        if merged == self.credentials {
            return self.default_executor();
        }
        debug!("Using per-request credentials");
        build_executor(&self.http, &self.endpoints, merged, &self.params)
    }
}
