//! `axisgrid_server` v1:
//! HTTP front end for the series-merge and chunked XLSX export pipeline.
//!
//! Layout:
//! - `conf`     : route, defaults and fixed messages
//! - `spec`     : request/response models and errors
//! - `config`   : command-line and environment configuration
//! - `pipeline` : load, merge and export one directory
//! - `handler`  : routing and request validation
//! - `http`     : blocking TCP transport
pub mod conf;
pub mod config;
pub mod handler;
pub mod http;
pub mod pipeline;
pub mod spec;

pub use config::{EnumChunkCountRuleArg, ServerConfig};
pub use handler::RequestHandler;
pub use http::{handle_connection, serve};
pub use pipeline::process_directory;
pub use spec::{HttpResponse, ProcessError, RequestError, SpecProcessOptions, SpecProcessOutcome};
