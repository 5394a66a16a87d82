//! Request, response and pipeline models.

use axisgrid_io_xlsx::{ExportError, ReportExport, SpecExportOptions};
use axisgrid_table::{ReportMerge, SpecMergeOptions, Table, TableError};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region PipelineSpecification

/// Options for one `process_directory` run.
#[derive(Debug, Clone, Default)]
pub struct SpecProcessOptions {
    /// Axis loading and series merging.
    pub merge: SpecMergeOptions,
    /// Chunked XLSX export.
    pub export: SpecExportOptions,
}

/// Everything produced by a successful run.
#[derive(Debug, Clone)]
pub struct SpecProcessOutcome {
    /// Merged table as exported.
    pub table: Table,
    /// Merge counters and warnings.
    pub report_merge: ReportMerge,
    /// Written chunk files and warnings.
    pub report_export: ReportExport,
}

/// Processing failure; the message is surfaced to the client verbatim.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RequestSpecification

/// Raw `POST /process_files` body.
///
/// Fields stay untyped so that a non-string value is reported as missing
/// rather than as a parse failure.
#[derive(Debug, Deserialize)]
pub struct SpecProcessRequest {
    #[serde(default)]
    pub directory_path: Option<Value>,
    #[serde(default)]
    pub output_directory_path: Option<Value>,
}

/// Request-level failure mapped to an HTTP status.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Both 'directory_path' and 'output_directory_path' are required")]
    MissingFields,
    #[error("Directory '{0}' does not exist")]
    SourceNotFound(String),
    #[error("Request body must be a JSON object")]
    InvalidBody,
    #[error("Malformed request")]
    MalformedRequest,
    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl RequestError {
    /// HTTP status code for this failure.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingFields
            | Self::SourceNotFound(_)
            | Self::InvalidBody
            | Self::MalformedRequest => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::PayloadTooLarge(_) => 413,
            Self::Process(_) => 500,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ResponseSpecification

/// JSON response with status code.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    /// `{"message": ...}` response.
    pub fn message(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }),
        }
    }

    /// `{"error": ...}` response.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    /// Reason phrase for the status line.
    pub fn status_text(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            413 => "Payload Too Large",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }
}

impl From<&RequestError> for HttpResponse {
    fn from(err: &RequestError) -> Self {
        HttpResponse::error(err.status(), &err.to_string())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
