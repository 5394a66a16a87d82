//! Server constants and fixed response texts.

/// Only routed path.
pub const C_ROUTE_PROCESS_FILES: &str = "/process_files";

/// Default bind host.
pub const C_HOST_DEFAULT: &str = "127.0.0.1";
/// Default bind port.
pub const N_PORT_DEFAULT: u16 = 5000;

/// Success message returned with status 200.
pub const C_MSG_SUCCESS: &str = "Files processed successfully";

/// Largest accepted request body in bytes.
pub const N_BODY_LEN_MAX: usize = 1024 * 1024;

/// Response content type.
pub const C_JSON_MIME: &str = "application/json";
