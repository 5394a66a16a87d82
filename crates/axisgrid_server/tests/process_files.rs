use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::thread;

use axisgrid_server::{RequestHandler, handle_connection};
use serde_json::{Value, json};
use tempfile::TempDir;

fn write_source(dir: &Path) {
    fs::write(dir.join("x axis.txt"), "1\n2\n3\n").expect("axis");
    fs::write(dir.join("5.txt"), "a\nb\n").expect("series 5");
    fs::write(dir.join("2.txt"), "x\ny\nz\n").expect("series 2");
    fs::write(dir.join("notes.csv"), "ignored\n").expect("csv");
}

fn derive_body(dir_source: &Path, dir_destination: &Path) -> String {
    json!({
        "directory_path": dir_source.to_string_lossy(),
        "output_directory_path": dir_destination.to_string_lossy(),
    })
    .to_string()
}

#[test]
fn process_files_writes_chunk_and_returns_success() {
    let tmp_src = TempDir::new().expect("src");
    let tmp_dst = TempDir::new().expect("dst");
    write_source(tmp_src.path());
    let dir_out = tmp_dst.path().join("out");

    let response = RequestHandler::default().handle(
        "POST",
        "/process_files",
        &derive_body(tmp_src.path(), &dir_out),
    );

    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({ "message": "Files processed successfully" })
    );
    assert!(dir_out.join("file_part_0.xlsx").is_file());
    assert!(!dir_out.join("file_part_1.xlsx").exists());
}

#[test]
fn process_files_requires_both_fields() {
    let response = RequestHandler::default().handle(
        "POST",
        "/process_files",
        r#"{"output_directory_path": "/tmp/out"}"#,
    );

    assert_eq!(response.status, 400);
    assert_eq!(
        response.body,
        json!({ "error": "Both 'directory_path' and 'output_directory_path' are required" })
    );
}

#[test]
fn process_files_rejects_nonexistent_source() {
    let tmp = TempDir::new().expect("tmp");
    let dir_missing = tmp.path().join("missing");

    let response = RequestHandler::default().handle(
        "POST",
        "/process_files",
        &derive_body(&dir_missing, tmp.path()),
    );

    assert_eq!(response.status, 400);
    assert_eq!(
        response.body,
        json!({ "error": format!("Directory '{}' does not exist", dir_missing.to_string_lossy()) })
    );
}

#[test]
fn process_files_surfaces_processing_errors_as_500() {
    let tmp_src = TempDir::new().expect("src");
    let tmp_dst = TempDir::new().expect("dst");
    fs::write(tmp_src.path().join("x axis.txt"), "abc\n").expect("axis");

    let response = RequestHandler::default().handle(
        "POST",
        "/process_files",
        &derive_body(tmp_src.path(), tmp_dst.path()),
    );

    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({ "error": "could not convert axis label to float: 'abc' (line 1)" })
    );
}

#[test]
fn process_files_rejects_series_longer_than_axis() {
    let tmp_src = TempDir::new().expect("src");
    let tmp_dst = TempDir::new().expect("dst");
    fs::write(tmp_src.path().join("x axis.txt"), "1\n2\n").expect("axis");
    fs::write(tmp_src.path().join("7.txt"), "a\nb\nc\n").expect("series");

    let response = RequestHandler::default().handle(
        "POST",
        "/process_files",
        &derive_body(tmp_src.path(), tmp_dst.path()),
    );

    assert_eq!(response.status, 500);
    assert!(!tmp_dst.path().join("file_part_0.xlsx").exists());
}

#[test]
fn tcp_round_trip_returns_json_response() {
    let tmp_src = TempDir::new().expect("src");
    let tmp_dst = TempDir::new().expect("dst");
    write_source(tmp_src.path());

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        handle_connection(&mut stream, &RequestHandler::default()).expect("handle");
    });

    let body = derive_body(tmp_src.path(), tmp_dst.path());
    let mut client = TcpStream::connect(addr).expect("connect");
    write!(
        client,
        "POST /process_files HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
    .expect("write request");

    let mut raw = String::new();
    client.read_to_string(&mut raw).expect("read response");
    server.join().expect("server thread");

    assert!(raw.starts_with("HTTP/1.1 200 OK\r\n"));
    let (_, body_response) = raw.split_once("\r\n\r\n").expect("head/body split");
    let value: Value = serde_json::from_str(body_response).expect("json");
    assert_eq!(value["message"], "Files processed successfully");
    assert!(tmp_dst.path().join("file_part_0.xlsx").is_file());
}

#[test]
fn tcp_oversized_body_is_rejected_with_413() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        handle_connection(&mut stream, &RequestHandler::default()).expect("handle");
    });

    let mut client = TcpStream::connect(addr).expect("connect");
    write!(
        client,
        "POST /process_files HTTP/1.1\r\nHost: {addr}\r\nContent-Length: 18446744073709551615\r\n\r\n"
    )
    .expect("write request");

    let mut raw = String::new();
    client.read_to_string(&mut raw).expect("read response");
    server.join().expect("server thread");

    assert!(raw.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
    assert!(raw.ends_with(r#"{"error":"Request body exceeds 1048576 bytes"}"#));
}
