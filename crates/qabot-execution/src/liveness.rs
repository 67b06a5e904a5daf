//! Minimal HTTP liveness responder for platform health checks.
//!
//! Answers every request on every path with `200 OK` and the body `alive`.
//! Request contents are read and discarded.

use qabot_core::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

const BODY: &str = "alive";
const READ_TIMEOUT: Duration = Duration::from_secs(5);
/// Request bytes read before answering anyway.
const MAX_REQUEST_HEAD: usize = 16 * 1024;

pub struct LivenessServer {
    listener: TcpListener,
}

impl LivenessServer {
    /// Binds the listener. Port `0` picks a free port.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections until `cancel` fires.
    pub async fn serve(self, cancel: CancellationToken) {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(target: "qabot::liveness", "Liveness endpoint listening on {}", addr);
        }

        loop {
            let accepted = tokio::select! {
                _ = cancel.cancelled() => break,
                accepted = self.listener.accept() => accepted,
            };

            match accepted {
                Ok((stream, peer)) => {
                    tokio::spawn(async move {
                        if let Err(e) = respond(stream).await {
                            tracing::debug!(target: "qabot::liveness", %peer, "Liveness response failed: {}", e);
                        }
                    });
                }
                Err(e) => tracing::warn!(target: "qabot::liveness", "Accept failed: {}", e),
            }
        }

        tracing::info!(target: "qabot::liveness", "Liveness endpoint stopped");
    }
}

async fn respond(mut stream: TcpStream) -> std::io::Result<()> {
    // Silent or slow clients get answered after the timeout
    match tokio::time::timeout(READ_TIMEOUT, drain_request_head(&mut stream)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!(target: "qabot::liveness", "Reading request failed: {}", e),
        Err(_) => tracing::debug!(target: "qabot::liveness", "Request head not received in time"),
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        BODY.len(),
        BODY
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Reads until the blank line ending the request head, EOF, or the size cap.
async fn drain_request_head(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buffer = [0u8; 1024];
    while head.len() < MAX_REQUEST_HEAD {
        let read = stream.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&buffer[..read]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    Ok(())
}
