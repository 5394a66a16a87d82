//! Minimal blocking HTTP/1.1 transport over `std::net`.
//!
//! One thread per connection, one request per connection, `Connection: close`.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::conf::{C_JSON_MIME, N_BODY_LEN_MAX};
use crate::handler::RequestHandler;
use crate::spec::{HttpResponse, RequestError};

/// Parsed request head plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecHttpRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Accept connections forever, handling each on its own thread.
pub fn serve(listener: TcpListener, handler: Arc<RequestHandler>) {
    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                let handler = Arc::clone(&handler);
                thread::spawn(move || {
                    if let Err(err) = handle_connection(&mut stream, &handler) {
                        log::error!("Connection error: {err}");
                    }
                });
            }
            Err(err) => log::error!("Connection error: {err}"),
        }
    }
}

/// Read one request from `stream`, dispatch it and write the response.
pub fn handle_connection(stream: &mut TcpStream, handler: &RequestHandler) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let response = match read_request(&mut reader)? {
        Ok(request) => {
            let response = handler.handle(&request.method, &request.path, &request.body);
            log::info!(
                "{} {} -> {}",
                request.method,
                request.path,
                response.status
            );
            response
        }
        Err(err) => {
            log::warn!("Rejected request ({}): {err}", err.status());
            HttpResponse::from(&err)
        }
    };

    stream.write_all(&encode_response(&response))?;
    stream.flush()
}

/// Parse request line, headers and a `Content-Length` body.
///
/// The inner error covers a request line that is not `METHOD PATH ...`, an
/// unparseable `Content-Length` and a body longer than [`N_BODY_LEN_MAX`].
pub fn read_request<R: BufRead>(
    reader: &mut R,
) -> io::Result<Result<SpecHttpRequest, RequestError>> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let l_parts: Vec<&str> = request_line.split_whitespace().collect();
    if l_parts.len() < 2 {
        return Ok(Err(RequestError::MalformedRequest));
    }
    let method = l_parts[0].to_string();
    let path = l_parts[1].to_string();

    let mut n_content_length: usize = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        if let Some((key, val)) = line.trim().split_once(':')
            && key.trim().eq_ignore_ascii_case("content-length")
        {
            let c_len = val.trim();
            if c_len.is_empty() || !c_len.bytes().all(|b| b.is_ascii_digit()) {
                return Ok(Err(RequestError::MalformedRequest));
            }
            // Digits only, so a parse failure is an overflow.
            let n_len = c_len.parse::<u64>().unwrap_or(u64::MAX);
            if n_len > N_BODY_LEN_MAX as u64 {
                return Ok(Err(RequestError::PayloadTooLarge(N_BODY_LEN_MAX)));
            }
            n_content_length = n_len as usize;
        }
    }

    let mut body = Vec::new();
    reader
        .take(n_content_length as u64)
        .read_to_end(&mut body)?;
    if body.len() < n_content_length {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "request body ended after {} of {n_content_length} bytes",
                body.len()
            ),
        ));
    }

    Ok(Ok(SpecHttpRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

/// Serialize status line, headers and JSON body.
pub fn encode_response(response: &HttpResponse) -> Vec<u8> {
    let body = response.body.to_string();
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.status_text(),
        C_JSON_MIME,
        body.len(),
        body
    )
    .into_bytes()
}
