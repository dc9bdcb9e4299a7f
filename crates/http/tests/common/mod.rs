//! Common test utilities for HTTP source integration tests.
//!
//! Wiremock covers ordinary responses. For bodies wiremock cannot express
//! (chunked transfer without `Content-Length`, a body that stalls after its
//! first chunk) this module runs a minimal HTTP/1.1 server on a raw
//! `TcpListener`.
//!
//! # What this does NOT handle
//! - Keep-alive or more than one request per connection
//! - Request bodies

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[allow(unused_imports)]
pub use confstore::{Error, ErrorKind, OperationContext, Source};
#[allow(unused_imports)]
pub use confstore_http::HttpSource;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// How the raw server ends the response after writing its chunks.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Ending {
    /// Send the terminating zero-length chunk.
    Complete,
    /// Keep the connection open without sending anything else.
    Stall,
}

/// Serve every accepted connection a chunked `200 OK` with `chunks` as body.
///
/// Returns the URL of the `/config` path on the bound address.
#[allow(dead_code)]
pub async fn spawn_chunked_server(chunks: Vec<Vec<u8>>, ending: Ending) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let chunks = chunks.clone();
            tokio::spawn(async move {
                let _ = serve_chunked(stream, chunks, ending).await;
            });
        }
    });

    format!("http://{addr}/config")
}

async fn serve_chunked(
    mut stream: TcpStream,
    chunks: Vec<Vec<u8>>,
    ending: Ending,
) -> std::io::Result<()> {
    read_request_head(&mut stream).await?;

    stream
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\n\r\n")
        .await?;
    for chunk in chunks {
        stream
            .write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
            .await?;
        stream.write_all(&chunk).await?;
        stream.write_all(b"\r\n").await?;
        stream.flush().await?;
    }

    match ending {
        Ending::Complete => {
            stream.write_all(b"0\r\n\r\n").await?;
            stream.flush().await?;
        }
        Ending::Stall => tokio::time::sleep(Duration::from_secs(30)).await,
    }
    Ok(())
}

async fn read_request_head(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }
    Ok(())
}

/// Serve every accepted connection the raw bytes of `response`, then close it.
///
/// Returns the URL of the `/config` path on the bound address.
#[allow(dead_code)]
pub async fn spawn_raw_server(response: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                if read_request_head(&mut stream).await.is_ok() {
                    let _ = stream.write_all(response).await;
                    let _ = stream.shutdown().await;
                }
            });
        }
    });

    format!("http://{addr}/config")
}

/// A URL on a local port nothing listens on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/config")
}
