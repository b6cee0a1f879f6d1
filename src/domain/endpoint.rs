//! Endpoint addressing for the workflow REST API

use std::fmt;

use crate::domain::DomainError;

/// Server address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5678";

/// Path prefix of the public REST API.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

const ID_PLACEHOLDER: &str = "{id}";

/// Strip surrounding whitespace and every trailing slash.
///
/// `http://host/` and `http://host//` both become `http://host`, so joining
/// with an absolute path never yields a doubled slash.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Normalize a path prefix to `/segment/...` form without a trailing slash.
/// An empty prefix stays empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Opaque server-side workflow identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowId(String);

impl WorkflowId {
    /// Accept any non-blank identifier; surrounding whitespace is dropped.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyWorkflowId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target state of an activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activate,
    Deactivate,
}

impl Activation {
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::Activate
        } else {
            Self::Deactivate
        }
    }

    /// Verb used in the default endpoint path and in log output.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
        }
    }
}

/// URL builder rooted at `{base_url}{api_prefix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_root: String,
}

impl Endpoints {
    pub fn new(base_url: &str, api_prefix: &str) -> Self {
        Self {
            api_root: format!(
                "{}{}",
                normalize_base_url(base_url),
                normalize_prefix(api_prefix)
            ),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// `{root}/workflows`
    pub fn workflows(&self) -> String {
        format!("{}/workflows", self.api_root)
    }

    /// `{root}/workflows/{id}`
    pub fn workflow(&self, id: &WorkflowId) -> String {
        format!("{}/workflows/{}", self.api_root, id)
    }

    /// Expand a path template such as `/workflows/{id}/activate` below the API root.
    ///
    /// The template must contain the `{id}` placeholder; a missing leading
    /// slash is tolerated.
    pub fn expand(&self, template: &str, id: &WorkflowId) -> Result<String, DomainError> {
        if !template.contains(ID_PLACEHOLDER) {
            return Err(DomainError::InvalidPathTemplate(template.to_string()));
        }
        let path = template.trim().replace(ID_PLACEHOLDER, id.as_str());
        let path = path.trim_start_matches('/');
        Ok(format!("{}/{}", self.api_root, path))
    }
}
