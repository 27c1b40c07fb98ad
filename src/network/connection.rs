//! Per-connection reader and writer tasks.
//!
//! Two tasks share one connection: the reader decodes lines and
//! dispatches them, the writer drains the client's outbound queue to
//! the socket. Either side noticing the client's sticky error (set by
//! `QUIT`, a reader EOF, or a send-queue overflow) is what unwinds the
//! other — there's no separate cancellation token, since both loops
//! already poll the same flag on every iteration.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use chatty_proto::{Message, MAX_LINE_LEN};

use crate::error::ServerError;
use crate::handlers::{self, Context};
use crate::state::{Client, Service, User, UserId};
use crate::teardown;

/// Registration must complete within this long or the connection is
/// torn down.
pub const REGISTRATION_DEADLINE: Duration = Duration::from_secs(10);

/// Any transport `connection::run` can drive: a plain `TcpStream` or a
/// TLS-wrapped one. `AsyncRead + AsyncWrite` can't be combined directly
/// in a trait object, hence this marker trait with a blanket impl.
pub trait Stream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> Stream for T {}

#[instrument(skip(stream, service), fields(%addr))]
pub async fn run(
    stream: Box<dyn Stream>,
    addr: SocketAddr,
    service: Arc<Service>,
) -> Result<(), ServerError> {
    let id: UserId = service.next_user_id();
    let user = User::new(id, addr.ip(), service.server_name.clone());
    let (client, rx) = Client::new(id, addr, user);
    let client = Arc::new(client);

    let (read_half, write_half) = tokio::io::split(stream);
    let writer = tokio::spawn(writer_loop(write_half, rx));

    let result = reader_loop(read_half, &service, &client).await;

    if !client.has_err() {
        client.set_err("reader closed");
    }
    let graceful = client.quit_reason_is_graceful();
    if !graceful {
        teardown::quit(&service, &client, "");
    }

    // Drop our reference now that channel membership (the only other
    // source of `Arc<Client>` clones) has been cleared by teardown, so
    // the client's outbound sender drops, the writer's queue drains,
    // and `rx.recv()` returns `None` instead of blocking forever.
    drop(client);
    let _ = writer.await;

    if let Err(e) = &result {
        warn!(error = %e, "connection error");
    }
    info!("connection closed");
    result
}

async fn reader_loop(
    read_half: impl AsyncRead + Unpin,
    service: &Arc<Service>,
    client: &Arc<Client>,
) -> Result<(), ServerError> {
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::with_capacity(MAX_LINE_LEN);

    // A single absolute deadline set at connection accept, not a window
    // that resets on every line — otherwise a client trickling in one
    // line every 9 seconds would never trip it.
    let registration_deadline = tokio::time::Instant::now() + REGISTRATION_DEADLINE;

    loop {
        if client.has_err() {
            return Ok(());
        }

        let read_result = if client.is_registered() {
            read_line(&mut reader, &mut buf).await
        } else {
            tokio::time::timeout_at(registration_deadline, read_line(&mut reader, &mut buf))
                .await
                .map_err(|_| ServerError::RegistrationTimeout)?
        };

        let n = read_result?;
        if n == 0 {
            return Ok(());
        }

        if buf.len() > MAX_LINE_LEN {
            return Err(ServerError::LineTooLong);
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if !line.is_empty() {
            let msg = Message::decode(line);
            let mut ctx = Context { service, client };
            handlers::dispatch(&mut ctx, &msg).await;
        }
    }
}

/// Read one `\n`-terminated line (stopping once more than
/// `MAX_LINE_LEN` bytes have been consumed, so a runaway line can't
/// grow `buf` forever), reusing `buf` across calls.
async fn read_line(
    reader: &mut (impl AsyncRead + Unpin),
    buf: &mut Vec<u8>,
) -> Result<usize, ServerError> {
    buf.clear();
    let mut byte = [0u8; 1];
    loop {
        let n = reader.read(&mut byte).await?;
        if n == 0 {
            return Ok(buf.len());
        }
        buf.push(byte[0]);
        if byte[0] == b'\n' || buf.len() > MAX_LINE_LEN {
            return Ok(buf.len());
        }
    }
}

async fn writer_loop(mut write_half: impl AsyncWrite + Unpin, mut rx: mpsc::Receiver<Message>) {
    while let Some(msg) = rx.recv().await {
        let line = format!("{}\r\n", msg.encode());
        if write_half.write_all(line.as_bytes()).await.is_err() {
            // The reader side will notice the dead socket on its own
            // next read and tear the connection down; nothing for the
            // writer to signal here.
            break;
        }
    }
    let _ = write_half.shutdown().await;
}
