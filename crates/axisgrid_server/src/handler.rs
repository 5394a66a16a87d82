//! Request routing and validation for the `/process_files` endpoint.

use std::path::Path;

use serde_json::Value;

use crate::conf::{C_MSG_SUCCESS, C_ROUTE_PROCESS_FILES};
use crate::pipeline::process_directory;
use crate::spec::{HttpResponse, RequestError, SpecProcessOptions, SpecProcessRequest};

/// Stateless request handler; each call runs one pipeline to completion.
#[derive(Debug, Clone, Default)]
pub struct RequestHandler {
    options: SpecProcessOptions,
}

impl RequestHandler {
    pub fn new(options: SpecProcessOptions) -> Self {
        Self { options }
    }

    /// Route one request and build its response. Never fails.
    pub fn handle(&self, method: &str, path: &str, body: &str) -> HttpResponse {
        match self.route(method, path, body) {
            Ok(response) => response,
            Err(err) => {
                if err.status() >= 500 {
                    log::error!("{method} {path} failed: {err}");
                } else {
                    log::warn!("{method} {path} rejected ({}): {err}", err.status());
                }
                HttpResponse::from(&err)
            }
        }
    }

    fn route(&self, method: &str, path: &str, body: &str) -> Result<HttpResponse, RequestError> {
        let path_route = path.split_once('?').map_or(path, |(c_route, _)| c_route);
        if path_route != C_ROUTE_PROCESS_FILES {
            return Err(RequestError::NotFound);
        }
        if !method.eq_ignore_ascii_case("POST") {
            return Err(RequestError::MethodNotAllowed);
        }
        self.handle_process_files(body)
    }

    fn handle_process_files(&self, body: &str) -> Result<HttpResponse, RequestError> {
        let (c_dir_source, c_dir_destination) = parse_process_request(body)?;

        if !Path::new(&c_dir_source).exists() {
            return Err(RequestError::SourceNotFound(c_dir_source));
        }

        log::info!("Processing {c_dir_source} -> {c_dir_destination}");
        process_directory(&c_dir_source, &c_dir_destination, &self.options)
            .map_err(RequestError::from)?;
        Ok(HttpResponse::message(200, C_MSG_SUCCESS))
    }
}

/// Extract `(directory_path, output_directory_path)` from a JSON body.
fn parse_process_request(body: &str) -> Result<(String, String), RequestError> {
    let value: Value = serde_json::from_str(body).map_err(|_| RequestError::InvalidBody)?;
    if !value.is_object() {
        return Err(RequestError::InvalidBody);
    }
    let request: SpecProcessRequest =
        serde_json::from_value(value).map_err(|_| RequestError::InvalidBody)?;

    match (
        derive_required_text(request.directory_path),
        derive_required_text(request.output_directory_path),
    ) {
        (Some(c_dir_source), Some(c_dir_destination)) => Ok((c_dir_source, c_dir_destination)),
        _ => Err(RequestError::MissingFields),
    }
}

fn derive_required_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(c_text)) if !c_text.is_empty() => Some(c_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_process_request_accepts_two_strings() {
        let body = r#"{"directory_path": "/a", "output_directory_path": "/b"}"#;
        assert_eq!(
            parse_process_request(body).expect("parse"),
            ("/a".to_string(), "/b".to_string())
        );
    }

    #[test]
    fn parse_process_request_rejects_missing_empty_and_non_string() {
        for body in [
            r#"{"directory_path": "/a"}"#,
            r#"{"directory_path": "", "output_directory_path": "/b"}"#,
            r#"{"directory_path": 3, "output_directory_path": "/b"}"#,
            r#"{"directory_path": null, "output_directory_path": "/b"}"#,
            r#"{}"#,
        ] {
            assert!(matches!(
                parse_process_request(body),
                Err(RequestError::MissingFields)
            ));
        }
    }

    #[test]
    fn parse_process_request_rejects_non_object_body() {
        for body in ["", "not json", r#"["/a", "/b"]"#, "42"] {
            assert!(matches!(
                parse_process_request(body),
                Err(RequestError::InvalidBody)
            ));
        }
    }

    #[test]
    fn handle_routes_unknown_path_and_method() {
        let handler = RequestHandler::default();
        assert_eq!(handler.handle("GET", "/other", "").status, 404);

        let response = handler.handle("GET", "/process_files", "");
        assert_eq!(response.status, 405);
        assert_eq!(response.body, json!({ "error": "Method not allowed" }));
    }

    #[test]
    fn handle_reports_nonexistent_source() {
        let handler = RequestHandler::default();
        let body = r#"{"directory_path": "/definitely/not/here", "output_directory_path": "/tmp/x"}"#;
        let response = handler.handle("POST", "/process_files?x=1", body);
        assert_eq!(response.status, 400);
        assert_eq!(
            response.body,
            json!({ "error": "Directory '/definitely/not/here' does not exist" })
        );
    }
}
