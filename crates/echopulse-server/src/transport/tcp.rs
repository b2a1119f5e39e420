//! Raw TCP connection loop.
//!
//! Each inbound read chunk is handed to the handler as one request and the
//! response bytes are written back. Wire framing and serialization are out of
//! scope; request boundaries are whatever the peer's writes produce.

use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use echopulse_core::Result;

use crate::handler::RpcHandler;
use crate::session::{ConnectionSession, SessionRegistry};

const READ_BUF_BYTES: usize = 64 * 1024;
const OUTBOUND_QUEUE: usize = 1024;

/// Drive one connection until the peer disconnects, an I/O error occurs, or
/// the session is closed (by the handler or by shutdown).
pub async fn run_connection(
    stream: TcpStream,
    handler: Arc<dyn RpcHandler>,
    registry: Arc<SessionRegistry>,
) -> Result<()> {
    let (close_tx, mut close_rx) = mpsc::channel::<()>(1);
    let id = registry.register(close_tx.clone());
    let session = ConnectionSession::new(id, close_tx);

    let (mut reader, mut writer) = stream.into_split();
    let (out_tx, mut out_rx) = mpsc::channel::<Bytes>(OUTBOUND_QUEUE);

    let mut buf = vec![0u8; READ_BUF_BYTES];

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(resp) => {
                        if writer.write_all(&resp).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            read = reader.read(&mut buf) => {
                match read {
                    Ok(0) => break,
                    Ok(n) => {
                        let request = Bytes::copy_from_slice(&buf[..n]);
                        match handler.on_request(request, &session).await {
                            Ok(resp) => {
                                if out_tx.send(resp).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(session_id = id, error = %e, "request failed");
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::debug!(session_id = id, error = %e, "read failed");
                        break;
                    }
                }
            }

            // close requested by handler policy or shutdown drain
            _ = close_rx.recv() => {
                // Flush anything still queued so the response that triggered
                // the close is delivered before teardown.
                while let Ok(resp) = out_rx.try_recv() {
                    if writer.write_all(&resp).await.is_err() {
                        break;
                    }
                }
                tracing::debug!(session_id = id, "session closed");
                break;
            }
        }
    }

    registry.remove(id);
    let _ = writer.shutdown().await;
    Ok(())
}
