//! Shared utilities for integration testing: a programmable mock identity
//! authority speaking plain HTTP/1.1 over a Tokio TCP listener.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the mock authority does with one incoming request.
#[derive(Clone)]
pub enum MockStep {
    /// Answer with this HTTP status and body.
    Json(u16, String),
    /// Accept the request and never answer.
    Hang,
    /// Read the request, then drop the connection without a response.
    Abort,
}

/// Request bodies the authority has seen, as parsed JSON.
pub type SeenRequests = Arc<Mutex<Vec<serde_json::Value>>>;

/// Start a mock authority that consumes one scripted step per request.
///
/// Responses carry `Connection: close` so every request arrives on a fresh
/// connection and consumes exactly one step. A request beyond the end of the
/// script gets a 500.
pub async fn start_mock_authority(script: Vec<MockStep>) -> (SocketAddr, SeenRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
    let script = Arc::new(Mutex::new(script));

    let seen_writer = seen.clone();
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let step = {
                let mut script = script.lock().unwrap();
                if script.is_empty() {
                    None
                } else {
                    Some(script.remove(0))
                }
            };
            let seen = seen_writer.clone();
            tokio::spawn(async move {
                if let Some(body) = read_request_body(&mut socket).await {
                    if let Ok(json) = serde_json::from_slice(&body) {
                        seen.lock().unwrap().push(json);
                    }
                }
                match step {
                    Some(MockStep::Json(status, body)) => {
                        write_response(&mut socket, status, &body).await;
                    }
                    Some(MockStep::Hang) => {
                        std::future::pending::<()>().await;
                    }
                    Some(MockStep::Abort) => {
                        // Drop the socket with nothing written.
                    }
                    None => {
                        write_response(&mut socket, 500, "").await;
                    }
                }
            });
        }
    });

    (addr, seen)
}

/// Build one page body in the authority's envelope format.
pub fn page_body(total: usize, offset: usize, limit: usize, keys: &[&str]) -> String {
    let records: Vec<serde_json::Value> = keys
        .iter()
        .map(|key| {
            serde_json::json!({
                "projectId": "p-1",
                "name": "tenant-a",
                "accessKey": key,
                "accessSecret": format!("secret-{}", key),
                "status": "active",
                "updated": "2021-06-01 12:00:00",
            })
        })
        .collect();
    serde_json::json!({
        "message": "ok",
        "retCode": 0,
        "data": {"limit": limit, "total": total, "offset": offset, "accessKeySet": records},
    })
    .to_string()
}

async fn read_request_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    loop {
        if let Some(header_end) = find_header_end(&buf) {
            let content_length = parse_content_length(&buf[..header_end]).unwrap_or(0);
            if buf.len() >= header_end + content_length {
                return Some(buf[header_end..header_end + content_length].to_vec());
            }
        }
        let n = socket.read(&mut tmp).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&tmp[..n]);
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn parse_content_length(head: &[u8]) -> Option<usize> {
    let head = std::str::from_utf8(head).ok()?;
    head.lines()
        .find(|line| line.to_ascii_lowercase().starts_with("content-length:"))
        .and_then(|line| line.split(':').nth(1))
        .and_then(|v| v.trim().parse().ok())
}

async fn write_response(socket: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "200 OK",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}
