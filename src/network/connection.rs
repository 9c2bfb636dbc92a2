//! Connection
//!
//! Client side of a single server stream.

use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::rc::{Rc, Weak};
use std::time::Duration;

use bytes::Bytes;

use crate::config::{Config, ReadPolicy};
use crate::error::{RespError, Result};
use crate::protocol::ToArg;

use super::command::{Command, Resolver, Slot};
use super::pipeline::Pipeline;

/// A connection over plain TCP
pub type TcpConnection = Connection<TcpStream, TcpStream>;

/// Owns one byte stream and the command queues in front of it
///
/// Queuing a command never performs I/O. Bytes are written when a result is
/// requested, when [`Command::send`] is called, or on an explicit flush.
/// Dropping the connection sends every pending command and reads every
/// pending reply before the stream is released.
///
/// Not thread safe: a connection and its commands belong to one thread.
pub struct Connection<R: Read + 'static, W: Write + 'static> {
    pipeline: Rc<RefCell<Pipeline<R, W>>>,

    /// Set by [`Connection::close`] so drop does not drain twice
    closed: bool,
}

impl TcpConnection {
    /// Open a TCP connection using the given settings
    ///
    /// Applies nodelay and timeouts, then splits the socket into separately
    /// buffered read and write halves.
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let addrs: Vec<SocketAddr> = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| RespError::Config(format!("cannot resolve {}: {}", config.addr(), e)))?
            .collect();

        let stream = connect_any(&addrs, config)?;

        stream.set_nodelay(config.nodelay)?;
        if config.send_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.send_timeout_ms)))?;
        }
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        tracing::debug!("Connected to {} ({:?})", peer_addr, config.read_policy);

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self::from_parts(read_stream, write_stream, config))
    }
}

/// Try each resolved address in turn
fn connect_any(addrs: &[SocketAddr], config: &Config) -> Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        let attempt = if config.connect_timeout_ms > 0 {
            TcpStream::connect_timeout(addr, Duration::from_millis(config.connect_timeout_ms))
        } else {
            TcpStream::connect(addr)
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(match last_err {
        Some(e) => RespError::Io(e),
        None => RespError::Config(format!("no addresses for {}", config.addr())),
    })
}

impl<R: Read + 'static, W: Write + 'static> Connection<R, W> {
    /// Build a connection from already-open stream halves
    ///
    /// Only the buffer sizes and read policy of `config` apply here.
    pub fn from_parts(reader: R, writer: W, config: &Config) -> Self {
        Self {
            pipeline: Rc::new(RefCell::new(Pipeline::new(reader, writer, config))),
            closed: false,
        }
    }

    // =========================================================================
    // Queuing
    // =========================================================================

    /// Queue a command from a complete argument list, operation name first
    pub fn queue_command<I>(&self, args: I) -> Command
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.queue_args(args.into_iter().map(|arg| arg.to_arg()).collect())
    }

    /// Start building a command for the named operation
    pub fn command(&self, name: impl ToArg) -> CommandBuilder<'_, R, W> {
        CommandBuilder {
            conn: self,
            args: vec![name.to_arg()],
        }
    }

    fn queue_args(&self, args: Vec<Bytes>) -> Command {
        let slot = Slot::new(args);
        self.pipeline.borrow_mut().enqueue(Rc::clone(&slot));
        let pipeline = Rc::downgrade(&self.pipeline);
        let pipeline: Weak<RefCell<dyn Resolver>> = pipeline;
        Command::new(slot, pipeline)
    }

    // =========================================================================
    // Flushing
    // =========================================================================

    /// Write every queued command
    pub fn flush_all(&self) -> Result<()> {
        self.pipeline.borrow_mut().flush_all()
    }

    /// Write every queued command and read every outstanding reply
    pub fn resolve_all(&self) -> Result<()> {
        self.pipeline.borrow_mut().resolve_all()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Commands queued but not written
    pub fn pending_sends(&self) -> usize {
        self.pipeline.borrow().pending_sends()
    }

    /// Commands written whose replies are still on the stream
    pub fn pending_reads(&self) -> usize {
        self.pipeline.borrow().pending_reads()
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.pipeline.borrow().policy()
    }

    /// True once a transport or framing failure has made the stream unusable
    pub fn is_broken(&self) -> bool {
        self.pipeline.borrow().is_broken()
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Drain both queues and release the stream, reporting any failure
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        let result = self.pipeline.borrow_mut().shutdown();
        result
    }
}

impl<R: Read + 'static, W: Write + 'static> Drop for Connection<R, W> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.pipeline.borrow_mut().shutdown() {
            tracing::warn!("Error draining connection on drop: {}", e);
        }
    }
}

/// Fluent argument list for one command
///
/// ```no_run
/// # use redpipe::{Config, TcpConnection};
/// # fn main() -> redpipe::Result<()> {
/// let conn = TcpConnection::connect(&Config::default())?;
/// let cmd = conn.command("ZADD").arg("board").arg(12.5).arg("ann").queue();
/// assert_eq!(cmd.result()?.as_integer()?, 1);
/// # Ok(())
/// # }
/// ```
pub struct CommandBuilder<'a, R: Read + 'static, W: Write + 'static> {
    conn: &'a Connection<R, W>,
    args: Vec<Bytes>,
}

impl<'a, R: Read + 'static, W: Write + 'static> CommandBuilder<'a, R, W> {
    pub fn arg(mut self, arg: impl ToArg) -> Self {
        self.args.push(arg.to_arg());
        self
    }

    /// Append `arg` only when `enabled`
    pub fn arg_if(self, enabled: bool, arg: impl ToArg) -> Self {
        if enabled {
            self.arg(arg)
        } else {
            self
        }
    }

    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.args.extend(args.into_iter().map(|arg| arg.to_arg()));
        self
    }

    /// Append each pair as two consecutive arguments
    pub fn pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToArg,
        V: ToArg,
    {
        for (key, value) in pairs {
            self.args.push(key.to_arg());
            self.args.push(value.to_arg());
        }
        self
    }

    /// Put the command on the connection's send queue
    pub fn queue(self) -> Command {
        self.conn.queue_args(self.args)
    }
}
