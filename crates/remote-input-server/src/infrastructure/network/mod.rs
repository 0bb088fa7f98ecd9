//! TCP listener, per-connection read loops, and the request worker pool.
//!
//! The service speaks the framed protocol from `remote_input_core` over plain
//! TCP.  Each accepted connection gets a read task that parses frames off the
//! socket; decoded requests go onto one bounded queue feeding a fixed pool of
//! workers, which dispatch them and write the replies back under the
//! originating connection's write lock.  Replies therefore come back on the
//! right socket but not necessarily in request order; peers correlate by the
//! echoed sequence number.
//!
//! # Framing error policy
//!
//! - Header that does not parse (short read, bad version, unknown type): the
//!   stream can no longer be re-synchronized, so the connection is dropped.
//! - Header parses but declares a payload larger than any request message
//!   carries: treated like an unparseable header and the connection is
//!   dropped, before any payload byte is read or buffered.
//! - Header parses but carries a reply type code: answered with an
//!   `UnsupportedMessage` error, connection stays open.
//! - Header parses but the payload does not: answered with a
//!   `MalformedPayload` error, connection stays open, because the frame
//!   boundary itself was intact.

use std::net::SocketAddr;
use std::sync::Arc;

use remote_input_core::protocol::codec::{
    decode_header, decode_request_payload, encode_reply_now,
};
use remote_input_core::protocol::messages::{
    ErrorMessage, FrameHeader, ServiceErrorCode, ServiceReply, ServiceRequest, HEADER_SIZE,
    MAX_REQUEST_PAYLOAD,
};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch, Mutex};
use tracing::{debug, info, warn};

use crate::application::dispatch::Dispatcher;
use crate::config::ServerConfig;

/// Error type for the service listener.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bind failed on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("listener I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One decoded request waiting for a worker, with everything needed to write
/// the reply back to the right peer.
struct QueuedRequest {
    header: FrameHeader,
    request: ServiceRequest,
    writer: Arc<Mutex<OwnedWriteHalf>>,
    peer: SocketAddr,
}

/// The TCP front end of the service.
pub struct InputServer {
    listener: TcpListener,
    dispatcher: Dispatcher,
    config: ServerConfig,
}

impl InputServer {
    /// Binds the listener on the configured address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::BindFailed`] when the address is unavailable
    /// (port in use, missing privilege).
    pub async fn bind(config: ServerConfig, dispatcher: Dispatcher) -> Result<Self, ServerError> {
        let addr = SocketAddr::new(config.bind_address, config.port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::BindFailed { addr, source })?;
        info!("listening on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            dispatcher,
            config,
        })
    }

    /// The bound address, with the concrete port when `0` was configured.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts and services connections until `shutdown` flips to `true`.
    ///
    /// Returns once the accept loop has stopped and every worker has drained
    /// the requests that were already queued.  Connection read tasks observe
    /// the same signal and wind down on their own.
    pub async fn serve(self, shutdown: watch::Receiver<bool>) -> Result<(), ServerError> {
        let (queue_tx, queue_rx) = mpsc::channel::<QueuedRequest>(self.config.queue_depth);
        let queue_rx = Arc::new(Mutex::new(queue_rx));

        let mut workers = Vec::with_capacity(self.config.worker_count);
        for worker_id in 0..self.config.worker_count {
            workers.push(tokio::spawn(worker_loop(
                worker_id,
                Arc::clone(&queue_rx),
                self.dispatcher.clone(),
            )));
        }

        let mut accept_shutdown = shutdown.clone();
        loop {
            tokio::select! {
                _ = accept_shutdown.changed() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!("connection from {peer}");
                        tokio::spawn(serve_connection(
                            stream,
                            peer,
                            queue_tx.clone(),
                            shutdown.clone(),
                        ));
                    }
                    Err(e) => warn!("failed to accept connection: {e}"),
                },
            }
        }

        info!("listener stopped, draining in-flight requests");
        drop(self.listener);
        // Workers exit when the last sender clone (held by read tasks that
        // are themselves winding down) is gone and the queue runs dry.
        drop(queue_tx);
        for worker in workers {
            let _ = worker.await;
        }
        Ok(())
    }
}

/// Reads frames off one connection until the peer disconnects, the stream
/// becomes unparseable, or shutdown is signalled.
async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    queue: mpsc::Sender<QueuedRequest>,
    mut shutdown: watch::Receiver<bool>,
) {
    let (mut reader, writer) = stream.into_split();
    let writer = Arc::new(Mutex::new(writer));

    // The signal may have fired between accept and spawn; a receiver cloned
    // after the send would otherwise wait for a change that already happened.
    if *shutdown.borrow() {
        return;
    }

    loop {
        let header = tokio::select! {
            _ = shutdown.changed() => break,
            read = read_frame_header(&mut reader) => match read {
                Ok(Some(header)) => header,
                Ok(None) => break,
                Err(e) => {
                    debug!("dropping connection from {peer}: {e}");
                    break;
                }
            },
        };

        // The length field is peer-controlled and sizes the buffer below;
        // nothing legitimate declares more than the largest request payload.
        if header.payload_length as usize > MAX_REQUEST_PAYLOAD {
            debug!(
                "dropping connection from {peer}: declared payload of {} bytes exceeds the request maximum",
                header.payload_length
            );
            break;
        }

        let mut payload = vec![0u8; header.payload_length as usize];
        if !payload.is_empty() {
            tokio::select! {
                _ = shutdown.changed() => break,
                read = reader.read_exact(&mut payload) => {
                    if let Err(e) = read {
                        debug!("payload read from {peer} failed: {e}");
                        break;
                    }
                }
            }
        }

        if !header.message_type.is_request() {
            debug!("{peer} sent a reply-typed frame {:?}", header.message_type);
            let reply = ServiceReply::Error(ErrorMessage {
                error_code: ServiceErrorCode::UnsupportedMessage,
                description: format!("{:?} is not a servable request", header.message_type),
            });
            write_reply(&writer, &reply, header.sequence_number, peer).await;
            continue;
        }

        match decode_request_payload(header.message_type, &payload) {
            Ok(request) => {
                let queued = QueuedRequest {
                    header,
                    request,
                    writer: Arc::clone(&writer),
                    peer,
                };
                if queue.send(queued).await.is_err() {
                    // Workers are gone, which only happens on shutdown.
                    break;
                }
            }
            Err(e) => {
                // The frame boundary was intact, so this is answerable and
                // the connection survives.
                debug!("malformed {:?} payload from {peer}: {e}", header.message_type);
                let reply = ServiceReply::Error(ErrorMessage {
                    error_code: ServiceErrorCode::MalformedPayload,
                    description: e.to_string(),
                });
                write_reply(&writer, &reply, header.sequence_number, peer).await;
            }
        }
    }

    debug!("connection from {peer} closed");
}

/// Reads and parses one frame header.
///
/// `Ok(None)` is a clean end of stream before any header byte; everything
/// else that stops the read is an error, including disconnects mid-header.
async fn read_frame_header(
    reader: &mut OwnedReadHalf,
) -> Result<Option<FrameHeader>, std::io::Error> {
    let mut buf = [0u8; HEADER_SIZE];
    match reader.read_exact(&mut buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    decode_header(&buf)
        .map(Some)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// One pool worker: dequeues requests, dispatches, writes the reply.
async fn worker_loop(
    worker_id: usize,
    queue: Arc<Mutex<mpsc::Receiver<QueuedRequest>>>,
    dispatcher: Dispatcher,
) {
    loop {
        // The lock is held only to dequeue, so dispatches run in parallel
        // across the pool.
        let next = { queue.lock().await.recv().await };
        let Some(job) = next else { break };

        let reply = dispatcher.dispatch(&job.request).await;
        write_reply(&job.writer, &reply, job.header.sequence_number, job.peer).await;
    }
    debug!("worker {worker_id} stopped");
}

/// Encodes a reply carrying the request's sequence number and writes it under
/// the connection's write lock.
async fn write_reply(
    writer: &Arc<Mutex<OwnedWriteHalf>>,
    reply: &ServiceReply,
    sequence_number: u64,
    peer: SocketAddr,
) {
    match encode_reply_now(reply, sequence_number) {
        Ok(bytes) => {
            let mut guard = writer.lock().await;
            if let Err(e) = guard.write_all(&bytes).await {
                debug!("reply write to {peer} failed: {e}");
            }
        }
        Err(e) => warn!("reply encode for {peer} failed: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
