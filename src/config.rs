//! Configuration for redpipe
//!
//! Centralized connection settings with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::error::{RespError, Result};

/// Connection setup options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Server host name or address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Socket Options
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds, 0 = block until the OS gives up)
    pub connect_timeout_ms: u64,

    /// Send timeout (milliseconds, 0 = none)
    pub send_timeout_ms: u64,

    /// Receive timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Disable Nagle's algorithm for low latency writes
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Buffering
    // -------------------------------------------------------------------------
    /// Capacity of the buffered reader (bytes)
    pub read_buffer_size: usize,

    /// Capacity of the buffered writer (bytes)
    pub write_buffer_size: usize,

    // -------------------------------------------------------------------------
    // Pipelining
    // -------------------------------------------------------------------------
    /// What to send when a result is requested
    pub read_policy: ReadPolicy,
}

/// How much of the send queue goes out when a command's result is read
///
/// `FlushAll` writes every queued command before waiting on the first reply,
/// which keeps the wire busy when results are read roughly in enqueue order.
/// `FlushExact` writes only up to the command being read, so commands queued
/// after it stay local until they are needed themselves. That costs more,
/// smaller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadPolicy {
    /// Flush the whole send queue on any read
    #[default]
    FlushAll,

    /// Flush only up to and including the command being read
    FlushExact,
}

impl ReadPolicy {
    /// Map the boolean "flush all on read" flag to a policy
    pub fn from_flush_all(flush_all_on_read: bool) -> Self {
        if flush_all_on_read {
            ReadPolicy::FlushAll
        } else {
            ReadPolicy::FlushExact
        }
    }

    pub fn flushes_all(self) -> bool {
        self == ReadPolicy::FlushAll
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            connect_timeout_ms: 0,
            send_timeout_ms: 0,
            read_timeout_ms: 0,
            nodelay: true,
            read_buffer_size: 4 * 1024,
            write_buffer_size: 4 * 1024,
            read_policy: ReadPolicy::FlushAll,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` as passed to address resolution
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject settings that can never produce a working connection
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(RespError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(RespError::Config("port must be non-zero".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(RespError::Config(
                "read buffer size must be non-zero".to_string(),
            ));
        }
        if self.write_buffer_size == 0 {
            return Err(RespError::Config(
                "write buffer size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the send timeout (in milliseconds)
    pub fn send_timeout_ms(mut self, ms: u64) -> Self {
        self.config.send_timeout_ms = ms;
        self
    }

    /// Set the receive timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Toggle TCP_NODELAY
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.config.nodelay = enabled;
        self
    }

    /// Set the read buffer capacity (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the write buffer capacity (in bytes)
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.config.write_buffer_size = size;
        self
    }

    /// Set the read policy
    pub fn read_policy(mut self, policy: ReadPolicy) -> Self {
        self.config.read_policy = policy;
        self
    }

    /// Boolean form of [`ConfigBuilder::read_policy`]
    pub fn flush_all_on_read(mut self, enabled: bool) -> Self {
        self.config.read_policy = ReadPolicy::from_flush_all(enabled);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
