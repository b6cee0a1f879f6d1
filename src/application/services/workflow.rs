//! Workflow service
//!
//! One method per CLI verb. Each method performs exactly one HTTP request
//! and returns the decoded response.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    parse_json, render_json, Activation, ApiRequest, Endpoints, HttpMethod, HttpResponse,
    WorkflowId,
};
use crate::infrastructure::traits::{FileSystem, HttpClient};

/// Result of a webhook call: JSON if the server answered with JSON, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutput {
    Json(Value),
    Text(String),
}

impl WebhookOutput {
    fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    /// Printable form: pretty JSON or the text as received.
    pub fn render(&self) -> String {
        match self {
            Self::Json(value) => render_json(value),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Service translating workflow operations into REST calls.
pub struct WorkflowService {
    fs: Arc<dyn FileSystem>,
    http: Arc<dyn HttpClient>,
    settings: Arc<Settings>,
    endpoints: Endpoints,
}

impl WorkflowService {
    /// Create a new workflow service.
    pub fn new(fs: Arc<dyn FileSystem>, http: Arc<dyn HttpClient>, settings: Arc<Settings>) -> Self {
        let endpoints = Endpoints::new(&settings.base_url, &settings.api_prefix);
        Self {
            fs,
            http,
            settings,
            endpoints,
        }
    }

    /// `GET /workflows`
    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> ApplicationResult<Value> {
        self.send_json(ApiRequest::api(HttpMethod::Get, self.endpoints.workflows()))
    }

    /// `GET /workflows/{id}`
    #[instrument(level = "debug", skip(self))]
    pub fn get(&self, id: &str) -> ApplicationResult<Value> {
        let id = WorkflowId::parse(id)?;
        self.send_json(ApiRequest::api(HttpMethod::Get, self.endpoints.workflow(&id)))
    }

    /// `POST /workflows` with the file's JSON as body.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, file: &Path) -> ApplicationResult<Value> {
        let workflow = self.read_workflow(file)?;
        self.send_json(
            ApiRequest::api(HttpMethod::Post, self.endpoints.workflows()).with_body(workflow),
        )
    }

    /// `PATCH /workflows/{id}` with the file's JSON as body.
    #[instrument(level = "debug", skip(self))]
    pub fn update(&self, id: &str, file: &Path) -> ApplicationResult<Value> {
        let id = WorkflowId::parse(id)?;
        let workflow = self.read_workflow(file)?;
        self.send_json(
            ApiRequest::api(HttpMethod::Patch, self.endpoints.workflow(&id)).with_body(workflow),
        )
    }

    /// Activate or deactivate a workflow.
    ///
    /// Method and path come from `settings.activation`, since server versions
    /// differ in which endpoint they expose.
    #[instrument(level = "debug", skip(self))]
    pub fn set_activation(&self, id: &str, activation: Activation) -> ApplicationResult<Value> {
        let id = WorkflowId::parse(id)?;
        let template = self.settings.activation.path_for(activation);
        let url = self.endpoints.expand(template, &id)?;
        debug!("{} workflow {} via {}", activation.action(), id, url);
        self.send_json(ApiRequest::api(self.settings.activation.method, url))
    }

    /// POST `data` (a JSON string) to an arbitrary webhook URL without credentials.
    #[instrument(level = "debug", skip(self, data))]
    pub fn run_webhook(&self, url: &str, data: &str) -> ApplicationResult<WebhookOutput> {
        let payload = parse_json(data, "--data")?;
        let response = self.send(ApiRequest::webhook(url, payload))?;
        Ok(WebhookOutput::from_body(response.body))
    }

    fn read_workflow(&self, path: &Path) -> ApplicationResult<Value> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read workflow file", path)?;
        Ok(parse_json(&content, &path.display().to_string())?)
    }

    /// Execute one request and fail on 4xx/5xx.
    fn send(&self, request: ApiRequest) -> ApplicationResult<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self
            .http
            .execute(&request)
            .map_err(|source| ApplicationError::Transport {
                url: request.url.clone(),
                source,
            })?;
        debug!(status = response.status, "received response");

        if !response.is_success() {
            return Err(ApplicationError::HttpStatus {
                status: response.status,
                reason: response.reason,
                url: response.url,
                body: response.body,
            });
        }
        Ok(response)
    }

    fn send_json(&self, request: ApiRequest) -> ApplicationResult<Value> {
        let response = self.send(request)?;
        serde_json::from_str(&response.body).map_err(|source| ApplicationError::InvalidResponse {
            url: response.url,
            source,
        })
    }
}
