//! # redpipe
//!
//! A blocking client for the RESP wire protocol with:
//! - A typed value model and streaming codec
//! - Commands queued locally and written in batches (pipelining)
//! - Lazily resolved results, read back in strict send order
//! - Configurable flush policy on read
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Caller / Command Builders                   │
//! │            (get, set, zadd, ... or command(name))            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ queue (no I/O)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Connection                            │
//! │          send queue ──flush──▶ receive queue                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  BufWriter  │          │  BufReader  │
//!   │  (encode)   │          │  (decode)   │
//!   └──────┬──────┘          └──────▲──────┘
//!          │                        │
//!          └──────── TCP stream ────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use redpipe::{Config, TcpConnection};
//!
//! # fn main() -> redpipe::Result<()> {
//! let conn = TcpConnection::connect(&Config::default())?;
//! let set = conn.set("greeting", "hello");
//! let get = conn.get("greeting");
//!
//! // Both commands go out in one write; both replies are read here.
//! assert_eq!(get.result()?.as_text()?.as_deref(), Some("hello"));
//! assert!(set.is_resolved());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
mod commands;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RespError, Result};
pub use config::{Config, ReadPolicy};
pub use protocol::{ToArg, Value, ValueType};
pub use network::{Command, CommandBuilder, CommandState, Connection, TcpConnection};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of redpipe
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
