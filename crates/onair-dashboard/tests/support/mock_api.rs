#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

pub const STEP_TIMEOUT: Duration = Duration::from_secs(3);

/// Minimal in-process HTTP responder for the dispatcher's REST surface.
///
/// Answers `/api/v1/studios` with the configured studio list and any other
/// path with an empty 200, recording every requested path.
pub struct MockApiServer {
    addr: SocketAddr,
    path_rx: mpsc::Receiver<String>,
    server_task: JoinHandle<()>,
}

impl MockApiServer {
    pub async fn start(studios: Vec<String>) -> std::io::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        let (path_tx, path_rx) = mpsc::channel(64);
        let body = serde_json::to_string(&studios).expect("studio list serializes");

        let server_task = tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(pair) => pair,
                    Err(_) => break,
                };

                let path_tx = path_tx.clone();
                let body = body.clone();

                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    // GET requests carry no body; read until the head ends.
                    loop {
                        match stream.read(&mut chunk).await {
                            Ok(0) => return,
                            Ok(n) => {
                                head.extend_from_slice(&chunk[..n]);
                                if head.windows(4).any(|window| window == b"\r\n\r\n") {
                                    break;
                                }
                            }
                            Err(_) => return,
                        }
                    }

                    let head = String::from_utf8_lossy(&head);
                    let path = head
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();
                    let _ = path_tx.send(path.clone()).await;

                    let response = if path == "/api/v1/studios" {
                        format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    } else {
                        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string()
                    };
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Ok(Self {
            addr,
            path_rx,
            server_task,
        })
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Next requested path.
    pub async fn recv_path(&mut self) -> String {
        timeout(STEP_TIMEOUT, self.path_rx.recv())
            .await
            .expect("timed out waiting for api request")
            .expect("mock api path channel closed")
    }

    /// Next requested path within `wait`, if any request arrives.
    pub async fn try_recv_path(&mut self, wait: Duration) -> Option<String> {
        match timeout(wait, self.path_rx.recv()).await {
            Ok(Some(path)) => Some(path),
            _ => None,
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}
