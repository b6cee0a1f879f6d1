//! Domain layer: endpoint addressing and request/response values
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod endpoint;
pub mod error;
pub mod payload;
pub mod request;

pub use endpoint::{
    normalize_base_url, Activation, Endpoints, WorkflowId, DEFAULT_API_PREFIX, DEFAULT_BASE_URL,
};
pub use error::DomainError;
pub use payload::{parse_json, render_json};
pub use request::{ApiRequest, HttpMethod, HttpResponse};
