//! One-shot HTTP responder for client tests

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// The request the responder received
#[derive(Debug)]
pub(crate) struct CapturedRequest {
    /// Request line and headers
    pub head: String,
    pub body: String,
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Accept one connection, answer it with `status` and `body`, then close
///
/// Returns the base URL (`http://127.0.0.1:PORT/v1`) and a handle that
/// yields the captured request.
pub(crate) async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let reply = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let captured = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_string();
                let body_start = end + 4;
                let len = content_length(&head);
                if buf.len() >= body_start + len || n == 0 {
                    let body_end = (body_start + len).min(buf.len());
                    break CapturedRequest {
                        head,
                        body: String::from_utf8_lossy(&buf[body_start..body_end]).to_string(),
                    };
                }
            } else if n == 0 {
                break CapturedRequest {
                    head: String::from_utf8_lossy(&buf).to_string(),
                    body: String::new(),
                };
            }
        };

        let response = format!(
            "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            reply.len(),
            reply
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        captured
    });

    (format!("http://{}/v1", addr), handle)
}
