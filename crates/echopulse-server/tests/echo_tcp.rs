//! End-to-end tests over the TCP reference transport.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use echopulse_server::config::ServerConfig;
use echopulse_server::shell::ServerShell;

async fn start_server(close_every: u64) -> (std::net::SocketAddr, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let mut cfg = ServerConfig::default();
    cfg.server.listen = "127.0.0.1:0".into();
    cfg.server.close_every = close_every;

    let shell = ServerShell::bind(&cfg).await.unwrap();
    let addr = shell.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        shell
            .serve(async {
                let _ = stop_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, stop_tx, server)
}

/// Write one request and await its full echo.
async fn round_trip(stream: &mut TcpStream, payload: &[u8]) -> Vec<u8> {
    stream.write_all(payload).await.unwrap();
    let mut resp = vec![0u8; payload.len()];
    stream.read_exact(&mut resp).await.unwrap();
    resp
}

#[tokio::test]
async fn echoes_requests_unchanged() {
    let (addr, stop_tx, server) = start_server(50_000).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    assert_eq!(round_trip(&mut stream, b"hello").await, b"hello");
    assert_eq!(round_trip(&mut stream, b"echopulse").await, b"echopulse");

    let _ = stop_tx.send(());
    server.await.unwrap();
}

#[tokio::test]
async fn closes_the_session_at_the_threshold() {
    let (addr, stop_tx, server) = start_server(3).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();

    // The response that crosses the threshold is still delivered.
    for _ in 0..3 {
        assert_eq!(round_trip(&mut stream, b"ping").await, b"ping");
    }

    // Then the server tears the connection down.
    let mut buf = [0u8; 1];
    let eof = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("server should close the connection")
        .unwrap();
    assert_eq!(eof, 0);

    let _ = stop_tx.send(());
    server.await.unwrap();
}

#[tokio::test]
async fn other_sessions_keep_serving_after_a_close() {
    let (addr, stop_tx, server) = start_server(3).await;

    let mut doomed = TcpStream::connect(addr).await.unwrap();
    let mut survivor = TcpStream::connect(addr).await.unwrap();

    for _ in 0..3 {
        round_trip(&mut doomed, b"x").await;
    }
    let mut buf = [0u8; 1];
    assert_eq!(doomed.read(&mut buf).await.unwrap(), 0);

    // The survivor is unaffected by its neighbour's teardown.
    assert_eq!(round_trip(&mut survivor, b"still here").await, b"still here");

    let _ = stop_tx.send(());
    server.await.unwrap();
}

#[tokio::test]
async fn shutdown_drains_live_sessions() {
    let (addr, stop_tx, server) = start_server(0).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    assert_eq!(round_trip(&mut stream, b"hi").await, b"hi");

    let _ = stop_tx.send(());
    server.await.unwrap();

    // The drain signal closes the connection from the server side.
    let mut buf = [0u8; 1];
    let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("connection should be closed on shutdown")
        .unwrap();
    assert_eq!(n, 0);
}
