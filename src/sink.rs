//! Client capability for the remote monitoring sink.
//!
//! The reporter only ever sees the two traits here: a connector that opens a
//! connection and a connection that can send events and be closed. The real
//! implementation speaks newline-delimited JSON over TCP or UDP; tests swap
//! in mock connectors to drive the reporter's failure paths.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;

use crate::Event;
use crate::config::TransportKind;

/// The sink was unreachable or did not accept the connection in time.
#[derive(Debug)]
pub enum ConnectError {
    Timeout,
    Io(std::io::Error),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::Timeout => write!(f, "connect attempt timed out"),
            ConnectError::Io(err) => write!(f, "connect failed: {err}"),
        }
    }
}

impl std::error::Error for ConnectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectError::Io(err) => Some(err),
            ConnectError::Timeout => None,
        }
    }
}

impl From<std::io::Error> for ConnectError {
    fn from(err: std::io::Error) -> Self {
        ConnectError::Io(err)
    }
}

/// A write on an established connection failed.
#[derive(Debug)]
pub enum SendError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Io(err) => write!(f, "send failed: {err}"),
            SendError::Serialization(err) => write!(f, "event serialization failed: {err}"),
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SendError::Io(err) => Some(err),
            SendError::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SendError {
    fn from(err: std::io::Error) -> Self {
        SendError::Io(err)
    }
}

/// Opens connections to the sink.
#[async_trait]
pub trait SinkConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn SinkConnection>, ConnectError>;
}

/// One established connection, owned exclusively by the reporter.
#[async_trait]
pub trait SinkConnection: Send {
    async fn send(&mut self, event: &Event) -> Result<(), SendError>;

    async fn close(&mut self);
}

/// Connector for a real sink, newline-delimited JSON over TCP or UDP.
pub struct NetSink {
    address: String,
    transport: TransportKind,
    connect_timeout: Duration,
}

impl NetSink {
    pub fn new(address: String, transport: TransportKind, connect_timeout: Duration) -> Self {
        Self {
            address,
            transport,
            connect_timeout,
        }
    }
}

#[async_trait]
impl SinkConnector for NetSink {
    async fn connect(&self) -> Result<Box<dyn SinkConnection>, ConnectError> {
        match self.transport {
            TransportKind::Tcp => {
                let stream = timeout(self.connect_timeout, TcpStream::connect(&self.address))
                    .await
                    .map_err(|_| ConnectError::Timeout)??;
                Ok(Box::new(TcpConnection { stream }))
            }
            TransportKind::Udp => {
                let socket = UdpSocket::bind("0.0.0.0:0").await?;
                timeout(self.connect_timeout, socket.connect(&self.address))
                    .await
                    .map_err(|_| ConnectError::Timeout)??;
                Ok(Box::new(UdpConnection { socket }))
            }
        }
    }
}

struct TcpConnection {
    stream: TcpStream,
}

#[async_trait]
impl SinkConnection for TcpConnection {
    async fn send(&mut self, event: &Event) -> Result<(), SendError> {
        let mut line = serde_json::to_vec(event).map_err(SendError::Serialization)?;
        line.push(b'\n');
        self.stream.write_all(&line).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn close(&mut self) {
        let _ = self.stream.shutdown().await;
    }
}

struct UdpConnection {
    socket: UdpSocket,
}

#[async_trait]
impl SinkConnection for UdpConnection {
    async fn send(&mut self, event: &Event) -> Result<(), SendError> {
        let payload = serde_json::to_vec(event).map_err(SendError::Serialization)?;
        self.socket.send(&payload).await?;
        Ok(())
    }

    async fn close(&mut self) {}
}
