//! Connection to the action service child process.
//!
//! The service speaks newline-delimited JSON on stdin/stdout. A tokio runtime
//! owned by the connection runs three tasks: a writer draining queued
//! requests into stdin, a reader decoding stdout lines, and a task forwarding
//! stderr to the log. Decoded messages reach the UI thread over a std channel
//! so the palette is only ever touched from there.

use action_select::{decode_message, encode_request, ServiceMessage, ServiceRequest};
use anyhow::{Context, Result};
use std::process::Stdio;
use std::sync::mpsc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::runtime::Runtime;
use tokio::sync::mpsc as tokio_mpsc;

/// Something the UI loop has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    Message(ServiceMessage),
    /// The service closed its output or could not be read from.
    Disconnected,
}

/// Destination for palette requests.
pub trait ServiceSink {
    fn send(&mut self, request: &ServiceRequest) -> Result<()>;
}

/// A running action service.
pub struct ServiceConnection {
    /// Tokio runtime for the I/O tasks
    runtime: Runtime,
    child: Child,
    requests: tokio_mpsc::UnboundedSender<String>,
    events: mpsc::Receiver<ServiceEvent>,
}

impl ServiceConnection {
    /// Start `program` with `args` and wire up its standard streams.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let _guard = runtime.enter();

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start action service '{}'", program))?;
        log::info!(
            "Started action service '{}' (pid {:?})",
            program,
            child.id()
        );

        let stdin = child.stdin.take().context("Service stdin not captured")?;
        let stdout = child.stdout.take().context("Service stdout not captured")?;
        let stderr = child.stderr.take().context("Service stderr not captured")?;

        let (request_tx, request_rx) = tokio_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        runtime.spawn(write_requests(stdin, request_rx));
        runtime.spawn(read_messages(stdout, event_tx));
        runtime.spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                log::warn!("service: {}", line);
            }
        });

        Ok(Self {
            runtime,
            child,
            requests: request_tx,
            events: event_rx,
        })
    }

    /// Events received since the last call, without blocking.
    pub fn drain(&self) -> Vec<ServiceEvent> {
        self.events.try_iter().collect()
    }

    /// Stop the service if it is still running.
    pub fn shutdown(mut self) {
        // Closing the channel ends the writer and with it the child's stdin
        drop(self.requests);
        let child = &mut self.child;
        self.runtime.block_on(async {
            match child.try_wait() {
                Ok(Some(status)) => log::info!("Action service exited with {}", status),
                _ => {
                    if let Err(e) = child.kill().await {
                        log::warn!("Failed to stop action service: {}", e);
                    } else {
                        log::info!("Action service stopped");
                    }
                }
            }
        });
    }
}

impl ServiceSink for ServiceConnection {
    fn send(&mut self, request: &ServiceRequest) -> Result<()> {
        let line = encode_request(request)?;
        log::debug!("-> {}", line);
        self.requests
            .send(line)
            .context("Action service is no longer accepting requests")
    }
}

async fn write_requests(mut stdin: ChildStdin, mut requests: tokio_mpsc::UnboundedReceiver<String>) {
    while let Some(line) = requests.recv().await {
        let written = async {
            stdin.write_all(line.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.flush().await
        };
        if let Err(e) = written.await {
            log::error!("Failed to write to action service: {}", e);
            break;
        }
    }
}

async fn read_messages(stdout: ChildStdout, events: mpsc::Sender<ServiceEvent>) {
    let mut lines = BufReader::new(stdout).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(message) = decode_line(&line) {
                    if events.send(ServiceEvent::Message(message)).is_err() {
                        // UI loop is gone
                        return;
                    }
                }
            }
            Ok(None) => {
                log::info!("Action service closed its output");
                break;
            }
            Err(e) => {
                log::error!("Failed to read from action service: {}", e);
                break;
            }
        }
    }
    let _ = events.send(ServiceEvent::Disconnected);
}

/// Decode one stdout line; blank, unknown and malformed lines yield nothing.
fn decode_line(line: &str) -> Option<ServiceMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    log::debug!("<- {}", line);
    match decode_message(line) {
        Ok(message) => message,
        Err(e) => {
            log::warn!("Skipping malformed service output: {}", e);
            None
        }
    }
}
