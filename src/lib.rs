//! n8nctl: command-line client for the n8n workflow automation REST API
//!
//! Layers, innermost first:
//! - [`domain`]: endpoint addressing, request/response values, JSON payloads
//! - [`application`]: [`application::services::WorkflowService`], one method per command
//! - [`infrastructure`]: file system and HTTP boundaries, service container
//! - [`cli`]: argument parsing, dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
